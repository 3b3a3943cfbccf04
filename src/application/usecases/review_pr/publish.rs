//! 프롬프트 결과를 코멘트/리뷰로 게시하는 단계.

use tracing::{error, info, warn};

use crate::application::errors::{HttpStatusError, PromptTaskError};
use crate::domain::prompt::PromptSpec;
use crate::domain::review::{ReviewEvent, parse_review_comments};

use super::orchestrator::{PromptOutcome, TaskContext};

/// 본문 앞에 프롬프트 이름 헤더를 붙여 일반 코멘트로 게시한다.
pub(super) async fn publish_comment(
    ctx: &TaskContext,
    spec: &PromptSpec,
    content: &str,
) -> Result<PromptOutcome, PromptTaskError> {
    let body = format!("## {}\n{}", spec.name, content);
    ctx.comments
        .post_comment(&ctx.target, &body)
        .await
        .map_err(|err| PromptTaskError::CommentPostFailure {
            prompt_name: spec.name.clone(),
            cause: format!("{err:#}"),
        })?;
    Ok(PromptOutcome::Commented)
}

/// 응답을 인라인 코멘트 배열로 해석해 변경 요청 리뷰를 만들고 제출한다.
pub(super) async fn publish_review(
    ctx: &TaskContext,
    spec: &PromptSpec,
    content: &str,
) -> Result<PromptOutcome, PromptTaskError> {
    let comments =
        parse_review_comments(content).map_err(|err| PromptTaskError::ReviewParseFailure {
            prompt_name: spec.name.clone(),
            cause: err.to_string(),
            raw_text: content.to_string(),
        })?;

    if comments.is_empty() {
        info!(prompt_name = %spec.name, "no review comments suggested, skipping review");
        return Ok(PromptOutcome::NothingToReview);
    }

    let body = format!("## {}", spec.name);
    let review_id = ctx
        .reviews
        .create_review(&ctx.target, &body, &comments)
        .await
        .map_err(|err| PromptTaskError::ReviewCreateFailure {
            prompt_name: spec.name.clone(),
            cause: format!("{err:#}"),
            response_body: HttpStatusError::body_of(&err),
        })?;

    ctx.reviews
        .submit_review(&ctx.target, review_id, &body, ReviewEvent::RequestChanges)
        .await
        .map_err(|err| PromptTaskError::ReviewSubmitFailure {
            prompt_name: spec.name.clone(),
            cause: format!("{err:#}"),
            response_body: HttpStatusError::body_of(&err),
        })?;

    info!(prompt_name = %spec.name, review_id, "review submitted");
    Ok(PromptOutcome::Reviewed {
        review_id,
        comments: comments.len(),
    })
}

/// 실패를 로그로 남기고 PR에 진단 코멘트를 한 번 시도한다.
/// 진단 코멘트 게시 실패는 로그만 남긴다.
pub(super) async fn report_failure(ctx: &TaskContext, err: &PromptTaskError) {
    warn!(prompt_name = %err.prompt_name(), "{err}");
    if let PromptTaskError::ReviewParseFailure { raw_text, .. } = err {
        warn!(prompt_name = %err.prompt_name(), "unparsable review response: {raw_text}");
    }

    if let Err(post_err) = ctx
        .comments
        .post_comment(&ctx.target, &err.report_markdown())
        .await
    {
        error!(
            prompt_name = %err.prompt_name(),
            "unable to post failure comment: {post_err:#}"
        );
    }
}
