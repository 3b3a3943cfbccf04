//! CI 환경 값을 GitHub PR 대상으로 해석하는 모듈.

use std::fmt;

use anyhow::{Context, Result, bail};

/// 코멘트/리뷰를 게시할 PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestTarget {
    /// `owner/name` 저장소 문자열과 `refs/pull/<n>/merge` ref로 대상을 만든다.
    pub fn from_ci(repository: &str, git_ref: &str) -> Result<Self> {
        let (owner, repo) = parse_repository(repository)?;
        let number = parse_pull_number(git_ref)?;
        Ok(Self {
            owner,
            repo,
            number,
        })
    }
}

impl fmt::Display for PullRequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

fn parse_repository(repository: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repository.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => bail!("GITHUB_REPOSITORY was in wrong format: {repository:?}"),
    }
}

fn parse_pull_number(git_ref: &str) -> Result<u64> {
    // refs/pull/<number>/merge
    let parts: Vec<&str> = git_ref.split('/').collect();
    if parts.len() < 3 {
        bail!("unable to extract PR number from ref {git_ref:?}");
    }
    parts[2]
        .parse()
        .with_context(|| format!("unable to extract PR number from ref {git_ref:?}"))
}
