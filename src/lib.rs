pub mod config;
pub mod github;
pub mod labels;
pub mod report;
pub mod verify;
