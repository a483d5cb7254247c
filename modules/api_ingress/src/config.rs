use serde::{Deserialize, Serialize};

/// `modules.api_ingress` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port`; empty means the server's `host`/`port`.
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default = "default_true")]
    pub enable_docs: bool,
    #[serde(default)]
    pub cors_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            enable_docs: true,
            cors_enabled: false,
        }
    }
}

impl ApiIngressConfig {
    /// Effective bind address, falling back to `host:port`.
    pub fn bind_addr_or(&self, host: &str, port: u16) -> String {
        if self.bind_addr.trim().is_empty() {
            format!("{host}:{port}")
        } else {
            self.bind_addr.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: ApiIngressConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.enable_docs);
        assert!(!cfg.cors_enabled);
        assert_eq!(cfg.bind_addr_or("127.0.0.1", 8088), "127.0.0.1:8088");
    }

    #[test]
    fn explicit_bind_addr_wins() {
        let cfg: ApiIngressConfig = serde_json::from_value(serde_json::json!({
            "bind_addr": "0.0.0.0:9000",
            "enable_docs": false
        }))
        .unwrap();
        assert!(!cfg.enable_docs);
        assert_eq!(cfg.bind_addr_or("127.0.0.1", 8088), "0.0.0.0:9000");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<ApiIngressConfig, _> =
            serde_json::from_value(serde_json::json!({ "bind": "x" }));
        assert!(res.is_err());
    }
}
