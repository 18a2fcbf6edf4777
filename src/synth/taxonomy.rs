//! Static taxonomy of the three alert kinds.
//!
//! Everything here is a pure lookup: per-kind name pools, subtype sets,
//! severity weights, topic and corpus-file mappings, and the probability
//! thresholds the synthesizer draws against. An unknown kind is impossible
//! by construction since [`AlertKind`] is a closed enum.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The three alert kinds the system can synthesize and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    NetworkAttack,
    MaliciousSample,
    HostBehavior,
}

impl AlertKind {
    /// All kinds, in the order an `--all` run processes them.
    pub fn all() -> [AlertKind; 3] {
        [
            AlertKind::NetworkAttack,
            AlertKind::MaliciousSample,
            AlertKind::HostBehavior,
        ]
    }

    /// Numeric type code carried in every record's `alarm_type` field.
    pub fn type_code(&self) -> u8 {
        match self {
            AlertKind::NetworkAttack => 1,
            AlertKind::MaliciousSample => 2,
            AlertKind::HostBehavior => 3,
        }
    }

    /// Prefix embedded in alarm identifiers, e.g. `NA-2024-000042-1A2B3C`.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "NA",
            AlertKind::MaliciousSample => "MS",
            AlertKind::HostBehavior => "HB",
        }
    }

    /// Kafka topic this kind publishes to.
    pub fn topic(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "network-attack-alerts",
            AlertKind::MaliciousSample => "malicious-sample-alerts",
            AlertKind::HostBehavior => "host-behavior-alerts",
        }
    }

    /// File name of the persisted corpus for this kind.
    pub fn corpus_file(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "network_attack_mock_data.json",
            AlertKind::MaliciousSample => "malicious_sample_mock_data.json",
            AlertKind::HostBehavior => "host_behavior_mock_data.json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "network attack alerts",
            AlertKind::MaliciousSample => "malicious sample alerts",
            AlertKind::HostBehavior => "host behavior alerts",
        }
    }

    /// The fixed subtype set; every record's `alarm_subtype` is a member.
    pub fn subtypes(&self) -> &'static [u16] {
        match self {
            AlertKind::NetworkAttack => {
                &[1001, 1002, 1003, 1004, 1005, 1006, 1007, 1008, 1009, 1010]
            }
            AlertKind::MaliciousSample => &[2001, 2002, 2003, 2004, 2005, 2006, 2007],
            AlertKind::HostBehavior => {
                &[3001, 3002, 3003, 3004, 3005, 3006, 3007, 3008, 3009]
            }
        }
    }

    /// Relative weights for severity levels 1, 2 and 3.
    pub fn severity_weights(&self) -> [u32; 3] {
        match self {
            AlertKind::NetworkAttack => [20, 35, 45],
            AlertKind::MaliciousSample => [15, 40, 45],
            AlertKind::HostBehavior => [25, 35, 40],
        }
    }

    pub fn name_pool(&self) -> &'static [&'static str] {
        match self {
            AlertKind::NetworkAttack => NETWORK_ATTACK_NAMES,
            AlertKind::MaliciousSample => MALWARE_NAMES,
            AlertKind::HostBehavior => HOST_BEHAVIOR_NAMES,
        }
    }

    /// Tag embedded in control-rule identifiers (`RULE-<tag>-2024-###`).
    pub fn rule_tag(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "NET",
            AlertKind::MaliciousSample => "MAL",
            AlertKind::HostBehavior => "HOST",
        }
    }

    /// Tag embedded in control-task identifiers (`TASK-<tag>-2024-###`).
    pub fn task_tag(&self) -> &'static str {
        match self {
            AlertKind::NetworkAttack => "SEC",
            AlertKind::MaliciousSample => "MAL",
            AlertKind::HostBehavior => "HOST",
        }
    }

    /// Probability that a control-rule id is populated (vs the `"0"` sentinel).
    pub fn rule_presence(&self) -> f64 {
        match self {
            AlertKind::NetworkAttack | AlertKind::MaliciousSample => 0.8,
            AlertKind::HostBehavior => 0.7,
        }
    }

    /// Probability that a control-task id is populated (vs the `"0"` sentinel).
    pub fn task_presence(&self) -> f64 {
        match self {
            AlertKind::NetworkAttack => 0.7,
            AlertKind::MaliciousSample | AlertKind::HostBehavior => 0.6,
        }
    }
}

pub const NETWORK_ATTACK_NAMES: &[&str] = &[
    "APT Lazarus backdoor C2 communication",
    "SQL injection exploitation attempt",
    "Large-scale port scanning",
    "Phishing link visited",
    "DDoS attack - SYN flood",
    "Cross-site scripting attack",
    "Remote code execution attempt",
    "SSH brute-force attack",
    "DNS tunneling detected",
    "Webshell backdoor detected",
    "Command injection attack",
    "Server-side request forgery",
    "XML external entity injection",
    "Deserialization exploit",
    "Directory traversal attack",
    "Cross-site request forgery",
    "HTTP request smuggling",
    "Unauthorized Redis access",
    "MySQL injection attack",
    "File inclusion exploit",
];

pub const MALWARE_NAMES: &[&str] = &[
    "Emotet banking trojan variant",
    "WannaCry ransomware detected",
    "Mirai botnet sample",
    "XMRig cryptominer trojan",
    "Generic worm detected",
    "TrickBot trojan detected",
    "Ryuk ransomware",
    "Zeus banking trojan",
    "CobaltStrike backdoor",
    "Meterpreter backdoor",
    "PlugX remote access trojan",
    "DarkComet RAT",
    "njRAT remote trojan",
    "QuasarRAT remote access",
    "NanoCore RAT",
    "Agent Tesla keylogger",
    "FormBook infostealer",
    "LokiBot trojan",
    "Dridex banking trojan",
    "IcedID malware",
];

pub const HOST_BEHAVIOR_NAMES: &[&str] = &[
    "XMRig mining process detected",
    "Ransomware file encryption behavior",
    "Cobalt Strike beacon detected",
    "SSH brute-force attack",
    "Mimikatz credential theft",
    "PowerShell injection attack",
    "Sensitive data exfiltration",
    "Backdoor persistence",
    "Process injection detected",
    "In-memory implant injection",
    "Scheduled task persistence",
    "Registry run key modification",
    "System service creation",
    "DLL hijacking detected",
    "Privilege escalation exploit",
    "Pass-the-Hash attack",
    "WMI lateral movement",
    "PsExec remote execution",
    "SMB lateral propagation",
    "Anomalous network connection",
];

pub const APT_GROUPS: &[&str] = &[
    "Lazarus Group",
    "APT28",
    "APT29",
    "APT41",
    "OceanLotus",
    "",
];

pub const PROTOCOLS: &[&str] = &["HTTP", "HTTPS", "TCP", "UDP", "DNS", "SSH", "FTP", "SMTP"];

pub const ATTACK_STAGES: &[&str] = &[
    "Reconnaissance",
    "Initial Access",
    "Execution",
    "Persistence",
    "Privilege Escalation",
    "Defense Evasion",
    "Credential Access",
    "Discovery",
    "Lateral Movement",
    "Collection",
    "Command and Control",
    "Exfiltration",
    "Impact",
];

pub const VULN_TYPES: &[&str] = &[
    "SQL injection",
    "XSS",
    "Command injection",
    "File inclusion",
    "Deserialization",
    "",
];

pub const MALWARE_FAMILIES: &[&str] = &[
    "Emotet",
    "WannaCry",
    "Mirai",
    "XMRig",
    "Generic.Worm",
    "TrickBot",
    "Ryuk",
    "Zeus",
    "CobaltStrike",
    "Meterpreter",
    "PlugX",
    "DarkComet",
    "njRAT",
    "QuasarRAT",
    "NanoCore",
    "AgentTesla",
    "FormBook",
    "LokiBot",
];

pub const PLATFORMS: &[&str] = &[
    "Windows x86",
    "Windows x64",
    "Linux x64",
    "Linux ARM",
    "macOS",
    "Android",
];

pub const FILE_TYPES: &[&str] = &[
    "PE32 executable",
    "PE32+ executable",
    "ELF 32-bit",
    "ELF 64-bit",
    "Mach-O",
    "APK",
];

pub const LANGUAGES: &[&str] = &[
    "C",
    "C++",
    "C#",
    "Visual Basic",
    "Python",
    "Go",
    "Rust",
    "Assembly",
];

pub const WINDOWS_OS: &[&str] = &[
    "Windows 10",
    "Windows 11",
    "Windows Server 2016",
    "Windows Server 2019",
];

pub const LINUX_OS: &[&str] = &[
    "Ubuntu 20.04 LTS",
    "Ubuntu 22.04 LTS",
    "CentOS 7.9",
    "CentOS 8",
    "Red Hat Enterprise Linux 8",
    "Debian 11",
];
