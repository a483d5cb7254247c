use serde::{Deserialize, Serialize};

/// Configuration for the passports module (`modules.passports`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassportsConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PassportsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: PassportsConfig = serde_json::from_value(serde_json::json!({
            "default_page_size": 20
        }))
        .unwrap();
        assert_eq!(cfg.default_page_size, 20);
        assert_eq!(cfg.max_page_size, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<PassportsConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 20 }));
        assert!(res.is_err());
    }
}
