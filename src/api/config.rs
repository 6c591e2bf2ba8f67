//! YAML configuration for the `serve` command.
//!
//! Every field is optional in the file; missing ones take the
//! defaults below. CLI flags are applied on top afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::model_store::DEFAULT_MODEL_PATHS;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Socket address the HTTP listener binds to
    pub listen_addr: String,
    /// Artifact candidates, probed in order
    pub model_paths: Vec<PathBuf>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            model_paths: DEFAULT_MODEL_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Load a [`ServeConfig`] from a YAML file at `path`.
pub fn load_config(path: &Path) -> Result<ServeConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ServeConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config YAML {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config_full() {
        let f = write_yaml(
            r#"
listen_addr: "127.0.0.1:9000"
model_paths:
  - "/srv/models/churn_model.json"
  - "churn_model.json"
"#,
        );
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.model_paths[0], PathBuf::from("/srv/models/churn_model.json"));
        assert_eq!(config.model_paths.len(), 2);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let f = write_yaml("listen_addr: \"127.0.0.1:9000\"\n");
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.model_paths, ServeConfig::default().model_paths);
    }

    #[test]
    fn test_default_candidates_order() {
        let config = ServeConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.model_paths[0], PathBuf::from("churn_model.json"));
        assert_eq!(config.model_paths[2], PathBuf::from("/app/churn_model.json"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/serve.yaml")).is_err());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let f = write_yaml("not: [valid: yaml: {{{}}}");
        assert!(load_config(f.path()).is_err());
    }
}
