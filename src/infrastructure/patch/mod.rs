//! 패치 원천 구현(워크스페이스 파일, git diff).

pub mod git;
pub mod workspace;

pub use git::GitDiffer;
pub use workspace::WorkspaceFileReader;
