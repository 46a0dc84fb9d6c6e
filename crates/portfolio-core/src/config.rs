use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// GithubConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Operator login, used when the API cannot be asked.
    #[serde(default)]
    pub username: Option<String>,
    /// Organizations the operator belongs to, merged with fetched ones.
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: None,
            organizations: Vec::new(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ---------------------------------------------------------------------------
// IdeasConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeasConfig {
    /// Board where not-yet-started projects live.
    #[serde(default)]
    pub board_url: Option<String>,
    /// Notes shaped like `<description> named <name>. <rest>`.
    #[serde(default)]
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_projects_directory")]
    pub projects_directory: String,
    #[serde(default = "default_ignore_dotfiles")]
    pub ignore_dotfiles: bool,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub ideas: IdeasConfig,
    #[serde(default = "default_logo")]
    pub default_logo: String,
}

fn default_projects_directory() -> String {
    "~/projects".to_string()
}

fn default_ignore_dotfiles() -> bool {
    true
}

fn default_logo() -> String {
    "assets/default-logo.png".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_directory: default_projects_directory(),
            ignore_dotfiles: default_ignore_dotfiles(),
            github: GithubConfig::default(),
            ideas: IdeasConfig::default(),
            default_logo: default_logo(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    /// Load from `~/.config/portfoliodb/config.yaml`.
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::default_config_path()?)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let raw: Value = serde_yaml::from_str(data)?;
        if raw.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(normalize_keys(raw))?)
    }

    pub fn projects_dir(&self) -> Result<PathBuf> {
        paths::expand_home(&self.projects_directory)
    }
}

/// `"Projects Directory "` and `projects_directory` are the same key.
fn normalize_key(key: &str) -> String {
    key.trim().replace(' ', "_").to_lowercase()
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (k, v) in map {
                let k = match k {
                    Value::String(s) => Value::String(normalize_key(&s)),
                    other => other,
                };
                out.insert(k, normalize_keys(v));
            }
            Value::Mapping(out)
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed = Config::parse(&yaml).unwrap();
        assert_eq!(parsed.projects_directory, "~/projects");
        assert!(parsed.ignore_dotfiles);
        assert_eq!(parsed.github.api_url, "https://api.github.com");
        assert_eq!(parsed.github.timeout_seconds, 10);
    }

    #[test]
    fn keys_are_normalized() {
        let yaml = r#"
Projects Directory: /srv/projects
ignore dotfiles: false
GitHub:
  Username: ewen
  timeout seconds: 3
"#;
        let cfg = Config::parse(yaml).unwrap();
        assert_eq!(cfg.projects_directory, "/srv/projects");
        assert!(!cfg.ignore_dotfiles);
        assert_eq!(cfg.github.username.as_deref(), Some("ewen"));
        assert_eq!(cfg.github.timeout_seconds, 3);
    }

    #[test]
    fn ideas_section() {
        let yaml = r#"
ideas:
  board_url: https://github.com/users/ewen/projects/1
  notes:
    - "A tiny synth named bleep. Needs a UI"
"#;
        let cfg = Config::parse(yaml).unwrap();
        assert_eq!(
            cfg.ideas.board_url.as_deref(),
            Some("https://github.com/users/ewen/projects/1")
        );
        assert_eq!(cfg.ideas.notes.len(), 1);
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.default_logo, "assets/default-logo.png");
    }

    #[test]
    fn missing_file_is_default_but_broken_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(Config::load(&path).is_ok());

        std::fs::write(&path, "projects_directory: [unclosed").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn projects_dir_expands_home() {
        let mut cfg = Config::default();
        cfg.projects_directory = "/srv/projects".to_string();
        assert_eq!(cfg.projects_dir().unwrap(), PathBuf::from("/srv/projects"));
    }
}
