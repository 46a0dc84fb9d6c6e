use crate::error::{PortfolioError, Result};
use crate::io;
use crate::paths;
use std::path::{Path, PathBuf};

/// A project folder found under the projects directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledProject {
    /// Folder name.
    pub name: String,
    pub directory: PathBuf,
    /// Contents of `.portfoliodb/description.md`, if the file exists.
    pub description: Option<String>,
}

impl CrawledProject {
    pub fn description_path(&self) -> PathBuf {
        paths::description_path(&self.directory)
    }

    /// An empty description file counts as no description.
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Every project folder directly under `root`, sorted by name.
///
/// Failing to list `root` is an error. A description that cannot be read is
/// logged and reported as missing.
pub fn crawl(root: &Path, ignore_dotfiles: bool) -> Result<Vec<CrawledProject>> {
    if !root.is_dir() {
        return Err(PortfolioError::ProjectsDirNotFound(root.display().to_string()));
    }

    let mut projects = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let directory = entry.path();
        // Follows symlinks, so linked project folders are crawled too.
        if !directory.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore_dotfiles && name.starts_with('.') {
            continue;
        }
        let description = match io::read_optional(&paths::description_path(&directory)) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(project = %name, error = %e, "could not read description");
                None
            }
        };
        projects.push(CrawledProject {
            name,
            directory,
            description,
        });
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Look up one crawled project by folder name.
pub fn find<'a>(projects: &'a [CrawledProject], name: &str) -> Result<&'a CrawledProject> {
    projects
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PortfolioError::ProjectNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) {
        let root = dir.path();
        std::fs::create_dir_all(root.join("zeta/.portfoliodb")).unwrap();
        std::fs::write(root.join("zeta/.portfoliodb/description.md"), "---\nwip: true\n---\n").unwrap();
        std::fs::create_dir_all(root.join("alpha")).unwrap();
        std::fs::create_dir_all(root.join(".hidden")).unwrap();
        std::fs::write(root.join("notes.txt"), "not a project").unwrap();
    }

    #[test]
    fn crawl_lists_directories_in_name_order() {
        let dir = TempDir::new().unwrap();
        setup(&dir);

        let projects = crawl(dir.path(), true).unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(projects[0].description.is_none());
        assert_eq!(
            projects[1].description.as_deref(),
            Some("---\nwip: true\n---\n")
        );
    }

    #[test]
    fn dotfiles_are_kept_when_asked() {
        let dir = TempDir::new().unwrap();
        setup(&dir);
        let projects = crawl(dir.path(), false).unwrap();
        assert!(projects.iter().any(|p| p.name == ".hidden"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = crawl(&dir.path().join("nope"), true).unwrap_err();
        assert!(matches!(err, PortfolioError::ProjectsDirNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_project_folders_are_crawled() {
        let target = TempDir::new().unwrap();
        std::fs::create_dir_all(target.path().join(".portfoliodb")).unwrap();
        std::fs::write(target.path().join(".portfoliodb/description.md"), "# Linked\n").unwrap();
        let root = TempDir::new().unwrap();
        std::os::unix::fs::symlink(target.path(), root.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(root.path().join("missing"), root.path().join("dangling")).unwrap();

        let projects = crawl(root.path(), true).unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["linked"]);
        assert_eq!(projects[0].description.as_deref(), Some("# Linked\n"));
    }

    #[test]
    fn empty_description_is_not_a_description() {
        let mut project = CrawledProject {
            name: "blank".to_string(),
            directory: PathBuf::from("/projects/blank"),
            description: Some(String::new()),
        };
        assert!(!project.has_description());
        project.description = None;
        assert!(!project.has_description());
        project.description = Some("# Blank\n".to_string());
        assert!(project.has_description());
    }

    #[test]
    fn find_by_name() {
        let dir = TempDir::new().unwrap();
        setup(&dir);
        let projects = crawl(dir.path(), true).unwrap();
        assert_eq!(find(&projects, "zeta").unwrap().name, "zeta");
        assert!(matches!(
            find(&projects, "omega"),
            Err(PortfolioError::ProjectNotFound(_))
        ));
    }
}
