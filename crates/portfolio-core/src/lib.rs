pub mod config;
pub mod crawl;
pub mod error;
pub mod frontmatter;
pub mod git;
pub mod github;
pub mod health;
pub mod ideas;
pub mod io;
pub mod lang;
pub mod metadata;
pub mod paths;
pub mod progress;
pub mod project;
pub mod remote;
pub mod report;
pub mod scaffold;
pub mod version;

pub use error::{PortfolioError, Result};
