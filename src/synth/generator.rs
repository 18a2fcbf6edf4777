//! Record synthesizer.
//!
//! [`synthesize`] is a pure function of (kind, index, random stream): each
//! call produces one fully populated, immutable [`AlertRecord`] and shares no
//! mutable state with other calls beyond the RNG it is handed. Seeding the
//! RNG makes whole-corpus generation reproducible.

use crate::synth::random::{
    external_ip, hex_string, internal_ip, random_timestamp, session_id, DAY_MS,
};
use crate::synth::record::{
    AlertPayload, AlertRecord, HostBehaviorPayload, MalwareSamplePayload, NetworkAttackPayload,
    NetworkIndicators, RegistryArtifacts,
};
use crate::synth::taxonomy::{
    AlertKind, APT_GROUPS, ATTACK_STAGES, FILE_TYPES, LANGUAGES, LINUX_OS, MALWARE_FAMILIES,
    PLATFORMS, PROTOCOLS, VULN_TYPES, WINDOWS_OS,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Produce one alert record for the given kind and 1-based sequence index.
pub fn synthesize<R: Rng>(kind: AlertKind, index: u64, rng: &mut R) -> AlertRecord {
    let payload = match kind {
        AlertKind::NetworkAttack => AlertPayload::NetworkAttack(network_attack_payload(rng)),
        AlertKind::MaliciousSample => AlertPayload::MaliciousSample(malware_payload(rng)),
        AlertKind::HostBehavior => AlertPayload::HostBehavior(host_behavior_payload(rng)),
    };

    AlertRecord {
        alarm_id: alarm_id(kind, index, rng),
        alarm_date: random_timestamp(rng),
        alarm_severity: weighted_severity(kind.severity_weights(), rng),
        alarm_name: pick(rng, kind.name_pool()).to_string(),
        alarm_description: description(kind, index),
        alarm_type: kind.type_code(),
        alarm_subtype: kind.subtypes()[rng.gen_range(0..kind.subtypes().len())],
        source: rng.gen_range(0..=10),
        control_rule_id: control_rule_id(kind, rng),
        control_task_id: control_task_id(kind, rng),
        procedure_technique_id: technique_ids(rng),
        payload,
    }
}

/// `<Prefix>-2024-<6-digit index>-<6 uppercase hex>`. The hex suffix makes
/// collisions astronomically unlikely; a theoretical duplicate is tolerated,
/// not detected.
fn alarm_id<R: Rng>(kind: AlertKind, index: u64, rng: &mut R) -> String {
    format!(
        "{}-2024-{:06}-{}",
        kind.id_prefix(),
        index,
        hex_string(rng, 6).to_uppercase()
    )
}

fn description(kind: AlertKind, index: u64) -> String {
    match kind {
        AlertKind::NetworkAttack => {
            format!("Network attack behavior detected, alert sequence {index}")
        }
        AlertKind::MaliciousSample => {
            format!("Malicious sample detected, alert sequence {index}")
        }
        AlertKind::HostBehavior => {
            format!("Anomalous host behavior detected, alert sequence {index}")
        }
    }
}

/// Severity 1..=3 drawn from the kind's discrete weighted distribution.
fn weighted_severity<R: Rng>(weights: [u32; 3], rng: &mut R) -> u8 {
    // The taxonomy's weight tables are static and non-zero, so the
    // distribution always constructs.
    WeightedIndex::new(weights)
        .map(|dist| dist.sample(rng) as u8 + 1)
        .unwrap_or(3)
}

fn control_rule_id<R: Rng>(kind: AlertKind, rng: &mut R) -> String {
    if rng.gen_bool(kind.rule_presence()) {
        format!("RULE-{}-2024-{:03}", kind.rule_tag(), rng.gen_range(1..=999))
    } else {
        "0".to_string()
    }
}

fn control_task_id<R: Rng>(kind: AlertKind, rng: &mut R) -> String {
    if rng.gen_bool(kind.task_presence()) {
        format!("TASK-{}-2024-{:03}", kind.task_tag(), rng.gen_range(1..=500))
    } else {
        "0".to_string()
    }
}

fn technique_ids<R: Rng>(rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(1..=3);
    (0..count)
        .map(|_| {
            format!(
                "T{}.{:03}",
                rng.gen_range(1000..=1600),
                rng.gen_range(1..=9)
            )
        })
        .collect()
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn network_attack_payload<R: Rng>(rng: &mut R) -> NetworkAttackPayload {
    let has_apt = rng.gen_bool(0.1);
    let has_vuln = rng.gen_bool(0.3);

    NetworkAttackPayload {
        session_id: session_id(rng),
        ip_version: 4,
        src_ip: if rng.gen_bool(0.7) {
            external_ip(rng)
        } else {
            internal_ip(rng)
        },
        src_port: rng.gen_range(1024..=65535),
        dst_ip: internal_ip(rng),
        dst_port: [22, 80, 443, 3306, 3389, 8080, 21, 25][rng.gen_range(0..8)],
        protocol: pick(rng, PROTOCOLS).to_string(),
        terminal_id: if rng.gen_bool(0.5) {
            format!(
                "TERM-{}-{:03}",
                pick(rng, &["PC", "SVR"]),
                rng.gen_range(1..=999)
            )
        } else {
            String::new()
        },
        source_file_path: format!(
            "/data/traffic/2024/{:02}/{:02}/capture_{:06}.pcap",
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
            rng.gen_range(0..=235_959u32)
        ),
        signature_id: format!(
            "SIG-{}-{:03}",
            pick(rng, &["APT", "SQLI", "XSS", "SCAN", "DDOS"]),
            rng.gen_range(1..=999)
        ),
        attack_payload: serde_json::json!({
            "data": format!("payload_{}", hex_string(rng, 16))
        })
        .to_string(),
        attack_stage: pick(rng, ATTACK_STAGES).to_string(),
        attack_ip: external_ip(rng),
        attacked_ip: internal_ip(rng),
        apt_group: if has_apt {
            pick(rng, APT_GROUPS).to_string()
        } else {
            String::new()
        },
        vul_type: if has_vuln {
            pick(rng, VULN_TYPES).to_string()
        } else {
            String::new()
        },
        // CVE id only when a vulnerability is already on the record.
        cve_id: if has_vuln && rng.gen_bool(0.5) {
            format!("CVE-2024-{}", rng.gen_range(1000..=9999))
        } else {
            String::new()
        },
        vul_desc: if has_vuln {
            "Security vulnerability present and potentially exploitable".to_string()
        } else {
            String::new()
        },
    }
}

fn malware_payload<R: Rng>(rng: &mut R) -> MalwareSamplePayload {
    let has_apt = rng.gen_bool(0.05);
    let has_network = rng.gen_bool(0.4);

    let network = if has_network {
        NetworkIndicators {
            session_id: session_id(rng),
            ip_version: Some(4),
            src_ip: internal_ip(rng),
            src_port: Some(rng.gen_range(1024..=65535)),
            dst_ip: external_ip(rng),
            dst_port: Some([80, 443, 8080, 4444][rng.gen_range(0..4)]),
            protocol: pick(rng, &["HTTP", "HTTPS", "TCP"]).to_string(),
        }
    } else {
        NetworkIndicators::absent()
    };

    let last_analy_date = random_timestamp(rng);
    // Compile date derived backwards from the analysis date so the ordering
    // invariant holds structurally.
    let compile_date = last_analy_date - rng.gen_range(DAY_MS..=365 * DAY_MS);

    let mut engines: Vec<u8> = vec![1, 2, 3, 4, 5];
    engines.shuffle(rng);
    engines.truncate(rng.gen_range(1..=3));

    let detail_entries: Vec<serde_json::Value> = (0..rng.gen_range(1..=3))
        .map(|i| {
            serde_json::json!({
                "av_engine_name": format!("Engine{i}"),
                "av_label": format!("Trojan.{}", pick(rng, MALWARE_FAMILIES)),
            })
        })
        .collect();

    MalwareSamplePayload {
        network,
        terminal_id: format!(
            "TERM-{}-{:03}",
            pick(rng, &["PC", "SVR"]),
            rng.gen_range(1..=999)
        ),
        source_file_path: format!(
            "/data/samples/2024/{:02}/{:02}/sample_{:06}.{}",
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
            rng.gen_range(0..=235_959u32),
            pick(rng, &["exe", "dll", "elf", "so"])
        ),
        sample_source: rng.gen_range(0..=5),
        md5: hex_string(rng, 32),
        sha1: hex_string(rng, 40),
        sha256: hex_string(rng, 64),
        sha512: hex_string(rng, 128),
        ssdeep: {
            let block = rng.gen_range(96..=12288);
            let body_len = rng.gen_range(20..=40);
            format!("{}:{}", block, hex_string(rng, body_len))
        },
        sample_original_name: format!(
            "{}.{}",
            pick(
                rng,
                &["setup", "update", "install", "invoice", "document", "svchost", "explorer"]
            ),
            pick(rng, &["exe", "dll", "scr", "bat"])
        ),
        sample_description: String::new(),
        sample_family: pick(rng, MALWARE_FAMILIES).to_string(),
        apt_group: if has_apt {
            pick(rng, APT_GROUPS).to_string()
        } else {
            String::new()
        },
        sample_alarm_engine: engines,
        target_platform: pick(rng, PLATFORMS).to_string(),
        file_type: pick(rng, FILE_TYPES).to_string(),
        file_size: rng.gen_range(10_240..=10_485_760),
        language: pick(rng, LANGUAGES).to_string(),
        rule: format!(
            "YARA:{}_{}, AV:Trojan.{}.{}",
            pick(rng, MALWARE_FAMILIES),
            rng.gen_range(1..=100),
            pick(rng, &["Win32", "Win64", "Linux"]),
            pick(rng, MALWARE_FAMILIES)
        ),
        target_content: match rng.gen_range(0..3) {
            0 => String::new(),
            1 => format!("String: {}", hex_string(rng, 20)),
            _ => "Suspicious API calls detected".to_string(),
        },
        compile_date,
        last_analy_date,
        sample_alarm_detail: serde_json::Value::Array(detail_entries).to_string(),
    }
}

fn host_behavior_payload<R: Rng>(rng: &mut R) -> HostBehaviorPayload {
    let is_windows = rng.gen_bool(0.7);
    let has_network = rng.gen_bool(0.5);
    let has_registry = is_windows && rng.gen_bool(0.3);

    let network = if has_network {
        NetworkIndicators {
            session_id: session_id(rng),
            ip_version: Some(4),
            src_ip: internal_ip(rng),
            src_port: Some(rng.gen_range(1024..=65535)),
            dst_ip: external_ip(rng),
            dst_port: Some([80, 443, 4444, 8080, 21][rng.gen_range(0..5)]),
            protocol: pick(rng, &["HTTP", "HTTPS", "TCP", "SSH", "FTP"]).to_string(),
        }
    } else {
        NetworkIndicators::absent()
    };

    let registry = if has_registry {
        RegistryArtifacts {
            register_key_name: format!(
                "SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\{}",
                pick(rng, &["Run", "RunOnce"])
            ),
            register_key_value: format!(
                "C:\\ProgramData\\{}.exe",
                pick(rng, &["update", "service", "system"])
            ),
            register_path: format!(
                "HKEY_{}\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Run",
                pick(rng, &["CURRENT_USER", "LOCAL_MACHINE"])
            ),
        }
    } else {
        RegistryArtifacts::absent()
    };

    HostBehaviorPayload {
        network,
        terminal_id: format!(
            "TERM-{}-{:03}",
            pick(rng, &["PC", "SVR", "DC"]),
            rng.gen_range(1..=999)
        ),
        source_file_path: format!(
            "/data/logs/2024/{:02}/{:02}/host_{:06}.log",
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
            rng.gen_range(0..=235_959u32)
        ),
        host_name: if !is_windows || rng.gen_bool(0.5) {
            format!(
                "{}-SERVER-{:02}",
                pick(rng, &["WEB", "DB", "APP", "DC", "FILE"]),
                rng.gen_range(1..=99)
            )
        } else {
            format!(
                "{}-PC-{:03}",
                pick(rng, &["HR", "FIN", "IT", "SALES"]),
                rng.gen_range(1..=999)
            )
        },
        terminal_ip: internal_ip(rng),
        user_account: if rng.gen_bool(0.7) {
            pick(rng, &["root", "admin", "www-data", "SYSTEM"]).to_string()
        } else {
            format!("user{:03}", rng.gen_range(1..=999))
        },
        terminal_os: if is_windows {
            pick(rng, WINDOWS_OS).to_string()
        } else {
            pick(rng, LINUX_OS).to_string()
        },
        dst_process_md5: if rng.gen_bool(0.7) {
            hex_string(rng, 32)
        } else {
            String::new()
        },
        dst_process_path: if is_windows {
            format!(
                "C:\\Windows\\System32\\{}",
                pick(rng, &["cmd.exe", "powershell.exe", "rundll32.exe", "svchost.exe"])
            )
        } else {
            format!("/usr/bin/{}", pick(rng, &["bash", "python3", "curl", "wget"]))
        },
        dst_process_cli: format!("Process command line {}", hex_string(rng, 20)),
        src_process_md5: if rng.gen_bool(0.5) {
            hex_string(rng, 32)
        } else {
            String::new()
        },
        src_process_path: if is_windows {
            format!(
                "C:\\Program Files\\{}\\app.exe",
                pick(rng, &["Microsoft Office", "Common Files"])
            )
        } else {
            format!("/usr/sbin/{}", pick(rng, &["sshd", "httpd", "nginx"]))
        },
        src_process_cli: if rng.gen_bool(0.5) {
            String::new()
        } else {
            format!("Parent process {}", hex_string(rng, 10))
        },
        registry,
        file_name: if rng.gen_bool(0.7) {
            format!(
                "{}.{}",
                pick(rng, &["update", "config", "data", "temp"]),
                pick(rng, &["exe", "dll", "dat", "tmp"])
            )
        } else {
            String::new()
        },
        file_md5: if rng.gen_bool(0.6) {
            hex_string(rng, 32)
        } else {
            String::new()
        },
        file_path: if is_windows {
            format!(
                "C:\\Temp\\{}{}.exe",
                pick(rng, &["file", "data", "temp"]),
                rng.gen_range(1..=999)
            )
        } else {
            format!(
                "/tmp/.{}/{}",
                pick(rng, &["cache", "system", "update"]),
                hex_string(rng, 8)
            )
        },
    }
}
