//! Alert record data model.
//!
//! An [`AlertRecord`] is a flat envelope shared by all kinds plus a payload
//! that is one of three structurally distinct variants. The payload enum is
//! untagged: on the wire a record is a single flat JSON object, and the kind
//! is recovered from the variant-specific required fields (the numeric
//! `alarm_type` is informational, not a serde tag).
//!
//! Joint-presence field groups ([`NetworkIndicators`], [`RegistryArtifacts`])
//! are sub-structs flattened into the wire shape. They are only ever
//! constructed wholly populated or wholly empty, which makes the
//! all-or-nothing invariant structural rather than runtime-checked. Absent
//! fields keep their keys on the wire: strings serialize as `""`, numbers as
//! `null`, lists as `[]`.

use crate::synth::taxonomy::AlertKind;
use serde::{Deserialize, Serialize};

/// One synthetic alert, immutable after synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// `<Prefix>-<year>-<6-digit sequence>-<6 uppercase hex>`
    pub alarm_id: String,
    /// Epoch milliseconds within the configured one-year window.
    pub alarm_date: i64,
    /// Ordinal 1..=3, drawn from the kind's weighted distribution.
    pub alarm_severity: u8,
    pub alarm_name: String,
    pub alarm_description: String,
    pub alarm_type: u8,
    pub alarm_subtype: u16,
    /// Source-system ordinal 0..=10.
    pub source: u8,
    /// Formatted rule id, or the `"0"` sentinel when unset.
    pub control_rule_id: String,
    /// Formatted task id, or the `"0"` sentinel when unset.
    pub control_task_id: String,
    /// ATT&CK-style technique ids of the form `T####.###`.
    pub procedure_technique_id: Vec<String>,
    #[serde(flatten)]
    pub payload: AlertPayload,
}

impl AlertRecord {
    pub fn kind(&self) -> AlertKind {
        self.payload.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertPayload {
    NetworkAttack(NetworkAttackPayload),
    MaliciousSample(MalwareSamplePayload),
    HostBehavior(HostBehaviorPayload),
}

impl AlertPayload {
    pub fn kind(&self) -> AlertKind {
        match self {
            AlertPayload::NetworkAttack(_) => AlertKind::NetworkAttack,
            AlertPayload::MaliciousSample(_) => AlertKind::MaliciousSample,
            AlertPayload::HostBehavior(_) => AlertKind::HostBehavior,
        }
    }
}

/// Networking sub-record shared by the malware and host-behavior payloads.
///
/// Present or absent as a unit: either every field is populated or the whole
/// struct is [`NetworkIndicators::absent`]. The fields stay flattened into
/// the record so the wire shape keeps stable keys either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkIndicators {
    pub session_id: String,
    pub ip_version: Option<u8>,
    pub src_ip: String,
    pub src_port: Option<u16>,
    pub dst_ip: String,
    pub dst_port: Option<u16>,
    pub protocol: String,
}

impl NetworkIndicators {
    /// The all-empty form used when the record carries no network indicator.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.ip_version.is_some()
    }
}

/// Windows registry artifact triple, present or absent as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryArtifacts {
    pub register_key_name: String,
    pub register_key_value: String,
    pub register_path: String,
}

impl RegistryArtifacts {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        !self.register_path.is_empty()
    }
}

/// Payload of a network-attack alert. The session/5-tuple fields are always
/// populated for this kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAttackPayload {
    pub session_id: String,
    pub ip_version: u8,
    pub src_ip: String,
    pub src_port: u16,
    pub dst_ip: String,
    pub dst_port: u16,
    pub protocol: String,
    /// Empty when the alert is not tied to a managed terminal.
    pub terminal_id: String,
    /// Path of the traffic capture the alert was raised from.
    pub source_file_path: String,
    pub signature_id: String,
    /// JSON-encoded blob of the offending payload.
    pub attack_payload: String,
    pub attack_stage: String,
    pub attack_ip: String,
    pub attacked_ip: String,
    /// Empty unless the alert carries an APT attribution.
    pub apt_group: String,
    pub vul_type: String,
    /// Populated only when a vulnerability is present on the record.
    #[serde(rename = "CVE_id")]
    pub cve_id: String,
    pub vul_desc: String,
}

impl NetworkAttackPayload {
    pub fn has_vulnerability(&self) -> bool {
        !self.vul_type.is_empty() || !self.vul_desc.is_empty()
    }
}

/// Payload of a malicious-sample alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalwareSamplePayload {
    #[serde(flatten)]
    pub network: NetworkIndicators,
    pub terminal_id: String,
    pub source_file_path: String,
    pub sample_source: u8,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
    pub sha512: String,
    pub ssdeep: String,
    pub sample_original_name: String,
    pub sample_description: String,
    pub sample_family: String,
    pub apt_group: String,
    /// Non-empty set of detection-engine ordinals, 1..=3 distinct values.
    pub sample_alarm_engine: Vec<u8>,
    pub target_platform: String,
    pub file_type: String,
    pub file_size: u64,
    pub language: String,
    /// Composite rule-match string, e.g. `YARA:Emotet_12, AV:Trojan.Win32.Emotet`.
    pub rule: String,
    pub target_content: String,
    /// Strictly earlier than `last_analy_date`.
    pub compile_date: i64,
    pub last_analy_date: i64,
    /// JSON-encoded list of per-engine detection labels, 1..=3 entries.
    pub sample_alarm_detail: String,
}

/// Payload of a host-behavior alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostBehaviorPayload {
    #[serde(flatten)]
    pub network: NetworkIndicators,
    pub terminal_id: String,
    pub source_file_path: String,
    pub host_name: String,
    pub terminal_ip: String,
    pub user_account: String,
    pub terminal_os: String,
    pub dst_process_md5: String,
    pub dst_process_path: String,
    pub dst_process_cli: String,
    pub src_process_md5: String,
    pub src_process_path: String,
    pub src_process_cli: String,
    #[serde(flatten)]
    pub registry: RegistryArtifacts,
    pub file_name: String,
    pub file_md5: String,
    pub file_path: String,
}

impl HostBehaviorPayload {
    pub fn is_windows(&self) -> bool {
        self.terminal_os.starts_with("Windows")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_malware_payload(network: NetworkIndicators) -> MalwareSamplePayload {
        MalwareSamplePayload {
            network,
            terminal_id: "TERM-PC-001".to_string(),
            source_file_path: "/data/samples/2024/01/02/sample_000001.exe".to_string(),
            sample_source: 2,
            md5: "d".repeat(32),
            sha1: "e".repeat(40),
            sha256: "f".repeat(64),
            sha512: "a".repeat(128),
            ssdeep: "3072:abcdef".to_string(),
            sample_original_name: "invoice.exe".to_string(),
            sample_description: String::new(),
            sample_family: "Emotet".to_string(),
            apt_group: String::new(),
            sample_alarm_engine: vec![1, 3],
            target_platform: "Windows x64".to_string(),
            file_type: "PE32+ executable".to_string(),
            file_size: 123_456,
            language: "C++".to_string(),
            rule: "YARA:Emotet_12, AV:Trojan.Win32.Emotet".to_string(),
            target_content: String::new(),
            compile_date: 1_700_000_000_000,
            last_analy_date: 1_710_000_000_000,
            sample_alarm_detail: r#"[{"av_engine_name":"Engine0","av_label":"Trojan.Emotet"}]"#
                .to_string(),
        }
    }

    fn sample_record(payload: AlertPayload, alarm_type: u8) -> AlertRecord {
        AlertRecord {
            alarm_id: "MS-2024-000001-AB12CD".to_string(),
            alarm_date: 1_710_000_000_000,
            alarm_severity: 2,
            alarm_name: "Emotet banking trojan variant".to_string(),
            alarm_description: "Malicious sample detected, alert sequence 1".to_string(),
            alarm_type,
            alarm_subtype: 2001,
            source: 4,
            control_rule_id: "RULE-MAL-2024-017".to_string(),
            control_task_id: "0".to_string(),
            procedure_technique_id: vec!["T1204.002".to_string()],
            payload,
        }
    }

    #[test]
    fn test_absent_network_fields_keep_their_keys() {
        let record = sample_record(
            AlertPayload::MaliciousSample(sample_malware_payload(NetworkIndicators::absent())),
            2,
        );

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["session_id"], "");
        assert_eq!(json["ip_version"], serde_json::Value::Null);
        assert_eq!(json["src_ip"], "");
        assert_eq!(json["src_port"], serde_json::Value::Null);
        assert_eq!(json["protocol"], "");
    }

    #[test]
    fn test_round_trip_preserves_malware_record() {
        let network = NetworkIndicators {
            session_id: "SESSION-20240315-101112-042".to_string(),
            ip_version: Some(4),
            src_ip: "10.0.12.7".to_string(),
            src_port: Some(50123),
            dst_ip: "203.0.113.9".to_string(),
            dst_port: Some(443),
            protocol: "HTTPS".to_string(),
        };
        let record = sample_record(
            AlertPayload::MaliciousSample(sample_malware_payload(network)),
            2,
        );

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: AlertRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.kind(), AlertKind::MaliciousSample);
    }

    #[test]
    fn test_cve_field_uses_wire_name() {
        let payload = NetworkAttackPayload {
            session_id: "SESSION-20240101-000000-001".to_string(),
            ip_version: 4,
            src_ip: "198.51.100.4".to_string(),
            src_port: 40000,
            dst_ip: "10.0.0.5".to_string(),
            dst_port: 443,
            protocol: "HTTPS".to_string(),
            terminal_id: String::new(),
            source_file_path: "/data/traffic/2024/01/01/capture_000001.pcap".to_string(),
            signature_id: "SIG-SQLI-004".to_string(),
            attack_payload: r#"{"data":"payload_deadbeef"}"#.to_string(),
            attack_stage: "Execution".to_string(),
            attack_ip: "198.51.100.4".to_string(),
            attacked_ip: "10.0.0.5".to_string(),
            apt_group: String::new(),
            vul_type: "SQL injection".to_string(),
            cve_id: "CVE-2024-1234".to_string(),
            vul_desc: "Security vulnerability present and potentially exploitable".to_string(),
        };
        let record = sample_record(AlertPayload::NetworkAttack(payload), 1);

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["CVE_id"], "CVE-2024-1234");
        assert!(json.get("cve_id").is_none());

        let decoded: AlertRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.kind(), AlertKind::NetworkAttack);
    }
}
