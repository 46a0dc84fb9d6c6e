use crate::error::{PortfolioError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PORTFOLIODB_DIR: &str = ".portfoliodb";
pub const DESCRIPTION_FILE: &str = "description.md";

pub const LOGO_FILE: &str = "logo.png";
pub const VISUAL_IDENTITY_DIR: &str = "visual-identity";

pub const CONFIG_DIR: &str = ".config/portfoliodb";
pub const CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn portfoliodb_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(PORTFOLIODB_DIR)
}

pub fn description_path(project_dir: &Path) -> PathBuf {
    portfoliodb_dir(project_dir).join(DESCRIPTION_FILE)
}

pub fn default_config_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(PortfolioError::HomeNotFound)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return home::home_dir().ok_or(PortfolioError::HomeNotFound);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = home::home_dir().ok_or(PortfolioError::HomeNotFound)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let project = Path::new("/tmp/projects/ideaseed");
        assert_eq!(
            description_path(project),
            PathBuf::from("/tmp/projects/ideaseed/.portfoliodb/description.md")
        );
        assert_eq!(
            portfoliodb_dir(project),
            PathBuf::from("/tmp/projects/ideaseed/.portfoliodb")
        );
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(
            expand_home("/srv/projects").unwrap(),
            PathBuf::from("/srv/projects")
        );
        assert_eq!(expand_home("projects").unwrap(), PathBuf::from("projects"));
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = home::home_dir() {
            assert_eq!(expand_home("~/projects").unwrap(), home.join("projects"));
            assert_eq!(expand_home("~").unwrap(), home);
        }
    }
}
