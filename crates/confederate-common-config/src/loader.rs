//! Configuration file loading and parsing.

use crate::env::vars;
use crate::types::{ConfederateConfig, FailurePolicy};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the configuration file, relative to the project directory.
pub const CONFIG_DIR: &str = ".confederate";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

const ENV_REFERENCE: &str = r"\$\{([^}:]+)(?::-([^}]*))?\}";
const VARIABLE_NAME: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration loader.
pub struct ConfigLoader {
    config_path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader for `.confederate/config.yaml` under the given project directory.
    ///
    /// A missing file yields the default configuration.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE),
            required: false,
        }
    }

    /// Create a loader for an explicit configuration file, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Path of the configuration file this loader reads and writes.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, expanding and overriding from the process environment.
    pub fn load(&self) -> Result<ConfederateConfig, ConfigError> {
        self.load_with(|var| std::env::var(var).ok())
    }

    /// Load configuration with an explicit variable lookup.
    pub fn load_with<F>(&self, lookup: F) -> Result<ConfederateConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if self.config_path.exists() {
            let contents = std::fs::read_to_string(&self.config_path)?;
            let expanded = expand_env_vars(&contents, &lookup)?;

            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        } else if self.required {
            return Err(ConfigError::NotFound {
                path: self.config_path.clone(),
            });
        } else {
            ConfederateConfig::default()
        };

        apply_env_overrides(&mut config, &lookup)?;
        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, config: &ConfederateConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&self.config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Expand variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(ENV_REFERENCE)?;
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    for cap in re.captures_iter(content) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match (lookup(var_name), default) {
            (Some(v), _) => v,
            (None, Some(d)) => d.to_string(),
            (None, None) => {
                return Err(ConfigError::EnvVarNotFound {
                    var: var_name.to_string(),
                })
            }
        };

        result.push_str(&content[last..full_match.start()]);
        result.push_str(&value);
        last = full_match.end();
    }

    result.push_str(&content[last..]);
    Ok(result)
}

/// Apply `CONFEDERATE_*` overrides on top of a loaded configuration.
pub fn apply_env_overrides<F>(config: &mut ConfederateConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(vars::CONFEDERATE_OUTPUT_DIR) {
        config.generation.output_dir = Some(PathBuf::from(dir));
    }

    if let Some(root) = lookup(vars::CONFEDERATE_TEMPLATE_ROOT) {
        config.generation.template_root = Some(PathBuf::from(root));
    }

    if let Some(policy) = lookup(vars::CONFEDERATE_FAILURE_POLICY) {
        config.generation.failure_policy = policy
            .parse::<FailurePolicy>()
            .map_err(|message| ConfigError::ValidationError { message })?;
    }

    if let Some(dump) = lookup(vars::CONFEDERATE_DUMP_FILE) {
        config.generation.dump_file = PathBuf::from(dump);
    }

    Ok(())
}

/// Validate configuration values.
pub fn validate(config: &ConfederateConfig) -> Result<(), ConfigError> {
    if config.generation.dump_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "generation.dump_file must not be empty".to_string(),
        });
    }

    let name_pattern = Regex::new(VARIABLE_NAME)?;
    if let Some(name) = config.variables.keys().find(|k| !name_pattern.is_match(k)) {
        return Err(ConfigError::ValidationError {
            message: format!("variables.{} is not a valid variable name", name),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load_with(no_env).unwrap();
        assert_eq!(config, ConfederateConfig::default());
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::from_file(dir.path().join("missing.yaml"));
        match loader.load_with(no_env).unwrap_err() {
            ConfigError::NotFound { path } => assert!(path.ends_with("missing.yaml")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
generation:
  output_dir: out
  failure_policy: abort_on_first_failure
variables:
  org: acme
  year: 2024
"#,
        );

        let config = ConfigLoader::new(dir.path()).load_with(no_env).unwrap();

        assert_eq!(config.generation.output_dir, Some(PathBuf::from("out")));
        assert_eq!(
            config.generation.failure_policy,
            FailurePolicy::AbortOnFirstFailure
        );
        assert_eq!(config.generation.template_root, None);
        assert_eq!(
            config.generation.dump_file,
            PathBuf::from(crate::DEFAULT_DUMP_FILE)
        );

        let keys: Vec<&str> = config.variables.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["org", "year"]);
        assert_eq!(config.variables["org"], serde_json::json!("acme"));
        assert_eq!(config.variables["year"], serde_json::json!(2024));
    }

    #[test]
    fn test_env_var_expansion() {
        let lookup = lookup_from(&[("ORG", "acme")]);
        let result = expand_env_vars("org: ${ORG}", lookup).unwrap();
        assert_eq!(result, "org: acme");
    }

    #[test]
    fn test_env_var_default() {
        let result = expand_env_vars("org: ${NONEXISTENT:-default}", no_env).unwrap();
        assert_eq!(result, "org: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        match expand_env_vars("org: ${MISSING_VAR}", no_env).unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "MISSING_VAR"),
            other => panic!("expected EnvVarNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_env_vars_in_single_value() {
        let lookup = lookup_from(&[("PREFIX", "acme"), ("SUFFIX", "tools")]);
        let result = expand_env_vars("org: ${PREFIX}-${SUFFIX}", lookup).unwrap();
        assert_eq!(result, "org: acme-tools");
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
generation:
  template_root: ${TEMPLATES}
variables:
  org: ${ORG:-acme}
"#,
        );

        let config = ConfigLoader::new(dir.path())
            .load_with(lookup_from(&[("TEMPLATES", "/srv/templates")]))
            .unwrap();

        assert_eq!(
            config.generation.template_root,
            Some(PathBuf::from("/srv/templates"))
        );
        assert_eq!(config.variables["org"], serde_json::json!("acme"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
generation:
  output_dir: from-file
  failure_policy: collect_all
"#,
        );

        let config = ConfigLoader::new(dir.path())
            .load_with(lookup_from(&[
                (vars::CONFEDERATE_OUTPUT_DIR, "from-env"),
                (vars::CONFEDERATE_TEMPLATE_ROOT, "templates"),
                (vars::CONFEDERATE_FAILURE_POLICY, "abort-on-first-failure"),
                (vars::CONFEDERATE_DUMP_FILE, "/tmp/dump.tmp"),
            ]))
            .unwrap();

        assert_eq!(config.generation.output_dir, Some(PathBuf::from("from-env")));
        assert_eq!(
            config.generation.template_root,
            Some(PathBuf::from("templates"))
        );
        assert_eq!(
            config.generation.failure_policy,
            FailurePolicy::AbortOnFirstFailure
        );
        assert_eq!(config.generation.dump_file, PathBuf::from("/tmp/dump.tmp"));
    }

    #[test]
    fn test_invalid_policy_override() {
        let mut config = ConfederateConfig::default();
        let result = apply_env_overrides(
            &mut config,
            lookup_from(&[(vars::CONFEDERATE_FAILURE_POLICY, "sometimes")]),
        );
        match result.unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("sometimes")),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let mut config = ConfederateConfig::default();
        config.generation.dump_file = PathBuf::new();
        match validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("dump_file")),
            other => panic!("expected ValidationError, got {other:?}"),
        }

        let mut config = ConfederateConfig::default();
        config
            .variables
            .insert("1st-name".to_string(), serde_json::json!("x"));
        match validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("1st-name")),
            other => panic!("expected ValidationError, got {other:?}"),
        }

        let mut config = ConfederateConfig::default();
        config
            .variables
            .insert("_valid_Name2".to_string(), serde_json::json!("x"));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
generation:
  output_dir: out
  failure_policy: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load_with(no_env).unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_save_config() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = ConfederateConfig::default();
        config.generation.output_dir = Some(PathBuf::from("generated"));
        config.generation.failure_policy = FailurePolicy::AbortOnFirstFailure;
        config
            .variables
            .insert("org".to_string(), serde_json::json!("acme"));

        loader.save(&config).unwrap();
        assert!(dir.path().join(".confederate/config.yaml").exists());

        let loaded = loader.load_with(no_env).unwrap();
        assert_eq!(loaded, config);
    }
}
