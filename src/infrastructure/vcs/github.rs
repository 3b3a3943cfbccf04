//! GitHub REST API 연동 구현(이슈 코멘트, PR 리뷰).

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::config::GitHubSettings;
use crate::application::ports::{CommentPoster, ReviewSubmitter};
use crate::domain::review::{ReviewComment, ReviewEvent};
use crate::domain::target::PullRequestTarget;
use crate::infrastructure::http::{build_api_client, send_json, send_text};

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Self {
        Self {
            client: build_api_client(settings.timeout_secs),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        }
    }

    fn issue_comments_endpoint(&self, target: &PullRequestTarget) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, target.owner, target.repo, target.number
        )
    }

    fn reviews_endpoint(&self, target: &PullRequestTarget) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.api_base, target.owner, target.repo, target.number
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        self.client
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
    }
}

#[derive(Debug, Serialize)]
struct CreateReviewRequest<'a> {
    body: &'a str,
    comments: &'a [ReviewComment],
}

#[derive(Debug, Deserialize)]
struct ReviewResponse {
    id: u64,
}

#[async_trait]
impl CommentPoster for GitHubClient {
    async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<()> {
        let request = self
            .request(Method::POST, self.issue_comments_endpoint(target))
            .json(&json!({ "body": body }));
        send_text("github", "create comment", request).await?;
        Ok(())
    }
}

#[async_trait]
impl ReviewSubmitter for GitHubClient {
    async fn create_review(
        &self,
        target: &PullRequestTarget,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<u64> {
        // event 없이 만들면 PENDING 리뷰가 되고, 제출 단계에서 이벤트를 지정한다.
        let request = self
            .request(Method::POST, self.reviews_endpoint(target))
            .json(&CreateReviewRequest { body, comments });
        let review: ReviewResponse = send_json("github", "create review", request).await?;
        Ok(review.id)
    }

    async fn submit_review(
        &self,
        target: &PullRequestTarget,
        review_id: u64,
        body: &str,
        event: ReviewEvent,
    ) -> Result<()> {
        let url = format!("{}/{}/events", self.reviews_endpoint(target), review_id);
        let request = self
            .request(Method::POST, url)
            .json(&json!({ "body": body, "event": event.as_api_str() }));
        send_text("github", "submit review", request).await?;
        Ok(())
    }
}
