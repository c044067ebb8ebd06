use serde::Deserialize;

/// Server configuration, loadable from a YAML file. Every field has
/// a default so the binary runs with no file at all.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Text-generation collaborator. Scripted lines when absent.
    #[serde(default)]
    pub narrator: Option<NarratorConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NarratorConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            narrator: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.narrator.is_none());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config: Config = serde_yaml::from_str("port: 9000\n").expect("parse");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_narrator_section() {
        let raw = "narrator:\n  base_url: http://localhost:9999/\n  api_key: secret\n";
        let config: Config = serde_yaml::from_str(raw).expect("parse");
        let narrator = config.narrator.expect("narrator section");
        assert_eq!(narrator.base_url, "http://localhost:9999/");
        assert_eq!(narrator.api_key.as_deref(), Some("secret"));
    }
}
