//! VCS(GitHub) 연동 계층.

pub mod github;

pub use github::GitHubClient;
