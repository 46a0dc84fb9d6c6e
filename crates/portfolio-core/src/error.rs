use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("projects directory not found: {0}")]
    ProjectsDirNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("not a github remote: {0}")]
    InvalidRemote(String),

    #[error("git {command} failed in {dir}: {stderr}")]
    Git {
        command: String,
        dir: String,
        stderr: String,
    },

    #[error("github API returned {status} for {endpoint}: {message}")]
    Remote {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("github API request to {0} timed out")]
    RemoteTimeout(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PortfolioError {
    /// True for a remote 404, which callers usually read as "absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortfolioError::Remote { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
