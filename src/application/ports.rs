//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::patch::Patch;
use crate::domain::review::{Completion, ReviewComment, ReviewEvent};
use crate::domain::target::PullRequestTarget;

/// 워크스페이스에 놓인 패치 파일을 읽는 포트.
#[async_trait]
pub trait WorkspacePatchReader: Send + Sync {
    async fn read_patch(&self, path: &Path) -> Result<Patch>;
}

/// 두 ref 사이의 diff를 계산하는 포트.
#[async_trait]
pub trait RefDiffer: Send + Sync {
    async fn diff(&self, base_ref: &str, head_ref: &str) -> Result<Patch>;
}

/// 텍스트 생성(completion) 제공자 포트.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn complete(&self, prompt: &str) -> Result<Completion>;
}

/// PR에 일반 코멘트를 남기는 포트.
#[async_trait]
pub trait CommentPoster: Send + Sync {
    async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<()>;
}

/// 인라인 리뷰를 생성/제출하는 포트.
#[async_trait]
pub trait ReviewSubmitter: Send + Sync {
    /// 코멘트가 달린 리뷰를 만들고 리뷰 id를 돌려준다.
    async fn create_review(
        &self,
        target: &PullRequestTarget,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<u64>;
    async fn submit_review(
        &self,
        target: &PullRequestTarget,
        review_id: u64,
        body: &str,
        event: ReviewEvent,
    ) -> Result<()>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn prompt_status(&self, prompt: &str, status: &str, extra: Option<&str>);
    fn raw(&self, line: &str);
}
