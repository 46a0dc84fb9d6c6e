use anyhow::Context;
use portfolio_core::config::Config;
use std::path::{Path, PathBuf};

/// Load the configuration.
///
/// Priority:
/// 1. `--config` flag / `PORTFOLIODB_CONFIG` env var (passed in as `explicit`)
/// 2. `~/.config/portfoliodb/config.yaml`
///
/// A missing file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load_default().context("failed to load config"),
    }
}

/// The directory to crawl: the command's `DIR` argument, else the configured
/// projects directory.
pub fn resolve_projects_dir(explicit: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    config
        .projects_dir()
        .context("failed to resolve the projects directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_projects_dir(Some(dir.path()), &Config::default()).unwrap();
        assert_eq!(result, dir.path());
    }

    #[test]
    fn configured_dir_is_used() {
        let config = Config {
            projects_directory: "/srv/projects".to_string(),
            ..Config::default()
        };
        assert_eq!(
            resolve_projects_dir(None, &config).unwrap(),
            PathBuf::from("/srv/projects")
        );
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "Projects Directory: /srv/code\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.projects_directory, "/srv/code");
    }
}
