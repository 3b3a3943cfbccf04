//! 프롬프트별 completion 병렬 실행(fan-out)과 결과 수집(fan-in) 단계.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::application::errors::{HttpStatusError, PromptTaskError};
use crate::application::ports::{CommentPoster, CompletionProvider, Reporter, ReviewSubmitter};
use crate::domain::patch::Patch;
use crate::domain::prompt::{PromptKind, PromptSpec};
use crate::domain::target::PullRequestTarget;
use crate::domain::usage::UsageAccumulator;

use super::publish::{publish_comment, publish_review, report_failure};

/// 프롬프트 작업 하나의 최종 결과.
#[derive(Debug)]
pub enum PromptOutcome {
    /// 일반 코멘트 게시 완료
    Commented,
    /// 리뷰 생성/제출 완료
    Reviewed { review_id: u64, comments: usize },
    /// 제안이 없어 리뷰를 만들지 않음
    NothingToReview,
    /// 실패(진단 코멘트 게시 시도 완료)
    Failed(PromptTaskError),
}

#[derive(Debug)]
pub struct PromptReport {
    pub name: String,
    pub outcome: PromptOutcome,
}

/// 작업들이 공유하는 읽기 전용 실행 문맥.
pub(super) struct TaskContext {
    pub target: PullRequestTarget,
    pub completion: Arc<dyn CompletionProvider>,
    pub comments: Arc<dyn CommentPoster>,
    pub reviews: Arc<dyn ReviewSubmitter>,
    pub usage: Arc<UsageAccumulator>,
}

/// 프롬프트 테이블 전체를 병렬로 실행하고 모든 작업이 끝날 때까지 기다린다.
pub struct PromptOrchestrator {
    ctx: Arc<TaskContext>,
    reporter: Arc<dyn Reporter>,
}

impl PromptOrchestrator {
    pub fn new(
        target: PullRequestTarget,
        completion: Arc<dyn CompletionProvider>,
        comments: Arc<dyn CommentPoster>,
        reviews: Arc<dyn ReviewSubmitter>,
        usage: Arc<UsageAccumulator>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            ctx: Arc::new(TaskContext {
                target,
                completion,
                comments,
                reviews,
                usage,
            }),
            reporter,
        }
    }

    /// 프롬프트마다 작업 하나를 띄운다. 한 작업의 실패는 다른 작업에 영향을 주지 않는다.
    pub async fn run(&self, patch: &Patch, specs: &[PromptSpec]) -> Vec<PromptReport> {
        let patch_text: Arc<str> = Arc::from(patch.to_text());
        let mut tasks = JoinSet::new();

        for spec in specs {
            self.reporter.prompt_status(&spec.name, "running", None);
            let ctx = Arc::clone(&self.ctx);
            let spec = spec.clone();
            let patch_text = Arc::clone(&patch_text);
            tasks.spawn(async move {
                let started = Instant::now();
                let outcome = run_prompt_task(&ctx, &spec, &patch_text).await;
                (spec.name, outcome, started.elapsed().as_secs_f32())
            });
        }

        let mut reports = Vec::with_capacity(specs.len());
        while let Some(joined) = tasks.join_next().await {
            let (name, outcome, sec) = match joined {
                Ok(done) => done,
                Err(err) => {
                    // run_prompt_task가 패닉을 흡수하므로 취소된 경우에만 도달한다.
                    error!("prompt task could not be joined: {err}");
                    continue;
                }
            };
            let status = match &outcome {
                PromptOutcome::Failed(_) => "error",
                _ => "done",
            };
            self.reporter
                .prompt_status(&name, status, Some(&format!("{sec:.1}s")));
            reports.push(PromptReport { name, outcome });
        }

        reports
    }
}

/// 작업 하나를 끝까지 실행한다. 실패는 이 안에서 보고까지 마친다.
async fn run_prompt_task(ctx: &TaskContext, spec: &PromptSpec, patch_text: &str) -> PromptOutcome {
    let result = AssertUnwindSafe(process_prompt(ctx, spec, patch_text))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            Err(PromptTaskError::TaskAborted {
                prompt_name: spec.name.clone(),
                cause: panic_message(panic.as_ref()),
            })
        });

    match result {
        Ok(outcome) => outcome,
        Err(err) => {
            report_failure(ctx, &err).await;
            PromptOutcome::Failed(err)
        }
    }
}

async fn process_prompt(
    ctx: &TaskContext,
    spec: &PromptSpec,
    patch_text: &str,
) -> Result<PromptOutcome, PromptTaskError> {
    let prompt = spec.render(patch_text);
    debug!(prompt_name = %spec.name, "prompting: {prompt}");

    let completion = ctx.completion.complete(&prompt).await.map_err(|err| {
        let cause = match HttpStatusError::body_of(&err) {
            Some(body) => format!("{err:#}\n{body}"),
            None => format!("{err:#}"),
        };
        PromptTaskError::CompletionFailure {
            prompt_name: spec.name.clone(),
            cause,
        }
    })?;
    ctx.usage.add(completion.token_usage);

    let Some(content) = completion.first_content() else {
        return Err(PromptTaskError::EmptyResponse {
            prompt_name: spec.name.clone(),
            raw: format!("{completion:?}"),
        });
    };
    debug!(prompt_name = %spec.name, "prompt response: {content}");

    match spec.kind {
        PromptKind::Comment => publish_comment(ctx, spec, content).await,
        PromptKind::Review => publish_review(ctx, spec, content).await,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        return format!("task panicked: {msg}");
    }
    if let Some(msg) = panic.downcast_ref::<String>() {
        return format!("task panicked: {msg}");
    }
    warn!("prompt task panicked with a non-string payload");
    "task panicked".to_string()
}
