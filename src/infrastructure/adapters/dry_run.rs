//! GitHub 대신 콘솔로 결과를 내보내는 드라이런 게시자.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{CommentPoster, Reporter, ReviewSubmitter};
use crate::domain::review::{ReviewComment, ReviewEvent};
use crate::domain::target::PullRequestTarget;

pub struct DryRunPublisher {
    reporter: Arc<dyn Reporter>,
    next_review_id: AtomicU64,
}

impl DryRunPublisher {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            reporter,
            next_review_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl CommentPoster for DryRunPublisher {
    async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<()> {
        self.reporter
            .status("dry-run", &format!("comment on {target}"));
        for line in body.lines() {
            self.reporter.raw(line);
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewSubmitter for DryRunPublisher {
    async fn create_review(
        &self,
        target: &PullRequestTarget,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<u64> {
        let id = self.next_review_id.fetch_add(1, Ordering::Relaxed);
        self.reporter.status(
            "dry-run",
            &format!("review #{id} on {target} with {} comment(s)", comments.len()),
        );
        self.reporter.raw(body);
        for comment in comments {
            let range = match comment.start_line {
                Some(start) => format!("{start}-{}", comment.line),
                None => comment.line.to_string(),
            };
            self.reporter
                .raw(&format!("  {}:{} {}", comment.path, range, comment.body));
        }
        Ok(id)
    }

    async fn submit_review(
        &self,
        target: &PullRequestTarget,
        review_id: u64,
        _body: &str,
        event: ReviewEvent,
    ) -> Result<()> {
        self.reporter.status(
            "dry-run",
            &format!("submit review #{review_id} on {target} as {}", event.as_api_str()),
        );
        Ok(())
    }
}
