pub mod dash;
pub mod edit;
pub mod fill;
pub mod prune;
pub mod report;
