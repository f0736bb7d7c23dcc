use serde::Serialize;

use crate::ir::{DetectedEndpoint, RiskLevel};

/// A platform API path worth flagging when it shows up in retrieved text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownEndpoint {
    pub path: &'static str,
    pub endpoint_type: &'static str,
    pub risk: RiskLevel,
    pub description: &'static str,
}

pub static KNOWN_ENDPOINTS: &[KnownEndpoint] = &[
    KnownEndpoint {
        path: "/s/sfsites/aura",
        endpoint_type: "aura",
        risk: RiskLevel::High,
        description: "Aura Framework endpoint",
    },
    KnownEndpoint {
        path: "/aura",
        endpoint_type: "aura",
        risk: RiskLevel::High,
        description: "Classic Aura endpoint",
    },
    KnownEndpoint {
        path: "/services/data/",
        endpoint_type: "rest",
        risk: RiskLevel::Medium,
        description: "REST API",
    },
    KnownEndpoint {
        path: "/services/apexrest/",
        endpoint_type: "apex-rest",
        risk: RiskLevel::High,
        description: "Apex REST",
    },
    KnownEndpoint {
        path: "/services/Soap/",
        endpoint_type: "soap",
        risk: RiskLevel::Medium,
        description: "SOAP API",
    },
    KnownEndpoint {
        path: "/services/async/",
        endpoint_type: "bulk",
        risk: RiskLevel::Medium,
        description: "Bulk API",
    },
    KnownEndpoint {
        path: "/cometd/",
        endpoint_type: "streaming",
        risk: RiskLevel::Low,
        description: "Streaming API",
    },
    KnownEndpoint {
        path: "/connect/",
        endpoint_type: "connect",
        risk: RiskLevel::Low,
        description: "Connect API",
    },
];

impl KnownEndpoint {
    pub fn to_detected(&self) -> DetectedEndpoint {
        DetectedEndpoint {
            path: self.path.to_string(),
            endpoint_type: self.endpoint_type.to_string(),
            risk_level: self.risk,
            description: self.description.to_string(),
        }
    }
}

/// Plain substring containment against the catalog, in catalog order.
pub fn detect(content: &str) -> Vec<DetectedEndpoint> {
    KNOWN_ENDPOINTS
        .iter()
        .filter(|e| content.contains(e.path))
        .map(KnownEndpoint::to_detected)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_presence_is_enough() {
        let found = detect(r#"var endpoint = "/s/sfsites/aura?r=1";"#);
        let paths: Vec<_> = found.iter().map(|e| e.path.as_str()).collect();
        // "/aura" is a substring of "/s/sfsites/aura" and is reported too.
        assert_eq!(paths, vec!["/s/sfsites/aura", "/aura"]);
    }

    #[test]
    fn nothing_detected_in_plain_text() {
        assert!(detect("hello world").is_empty());
    }

    #[test]
    fn rest_endpoint_carries_type_and_risk() {
        let found = detect("fetch('/services/data/v58.0/sobjects')");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].endpoint_type, "rest");
        assert_eq!(found[0].risk_level, RiskLevel::Medium);
    }
}
