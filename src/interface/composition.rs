//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use tracing::{error, warn};

use crate::application::config::ActionConfig;
use crate::application::errors::RunError;
use crate::application::ports::{CommentPoster, Reporter, ReviewSubmitter};
use crate::application::usecases::inspect_prompts::InspectPromptsUseCase;
use crate::application::usecases::review_pr::ReviewPrUseCase;
use crate::domain::prompt::PromptSpec;
use crate::domain::usage::UsageAccumulator;
use crate::infrastructure::adapters::{ConsoleReporter, DryRunPublisher};
use crate::infrastructure::config::load_fallback_github;
use crate::infrastructure::patch::{GitDiffer, WorkspaceFileReader};
use crate::infrastructure::providers::OpenAiProvider;
use crate::infrastructure::vcs::GitHubClient;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Arc<ActionConfig>,
    usage: Arc<UsageAccumulator>,
    reporter: Arc<dyn Reporter>,
    dry_run: bool,
}

impl AppComposition {
    pub fn new(config: ActionConfig, usage: Arc<UsageAccumulator>, dry_run: bool) -> Self {
        Self {
            config: Arc::new(config),
            usage,
            reporter: Arc::new(ConsoleReporter::new()),
            dry_run,
        }
    }

    /// 리뷰 실행 유스케이스를 생성한다.
    /// 드라이런이면 코멘트/리뷰가 GitHub 대신 콘솔로 간다.
    pub fn review_usecase(&self) -> ReviewPrUseCase {
        if self.dry_run {
            let publisher = Arc::new(DryRunPublisher::new(Arc::clone(&self.reporter)));
            self.assemble(publisher.clone(), publisher)
        } else {
            let client = Arc::new(GitHubClient::new(&self.config.github));
            self.assemble(client.clone(), client)
        }
    }

    fn assemble(
        &self,
        comments: Arc<dyn CommentPoster>,
        reviews: Arc<dyn ReviewSubmitter>,
    ) -> ReviewPrUseCase {
        ReviewPrUseCase {
            config: Arc::clone(&self.config),
            workspace_reader: Arc::new(WorkspaceFileReader),
            differ: Arc::new(GitDiffer::new(&self.config.patch.workspace_dir)),
            completion: Arc::new(OpenAiProvider::new(&self.config.completion)),
            comments,
            reviews,
            usage: Arc::clone(&self.usage),
            reporter: Arc::clone(&self.reporter),
        }
    }
}

/// 프롬프트 점검 유스케이스를 생성한다.
pub fn inspect_prompts_usecase(prompts: &[PromptSpec]) -> InspectPromptsUseCase<'_> {
    InspectPromptsUseCase { prompts }
}

/// 설정 로딩 실패를 PR 코멘트로 한 번 알린다.
/// 토큰/저장소/ref가 모두 있어야 시도하며, 게시 실패는 로그만 남긴다.
pub async fn report_config_error<F>(lookup: F, err: &RunError, dry_run: bool)
where
    F: Fn(&str) -> Option<String>,
{
    error!("{err}");
    if dry_run {
        return;
    }
    let Some((target, settings)) = load_fallback_github(lookup) else {
        warn!("not enough configuration to report the error on the pull request");
        return;
    };

    let body = format!(":x: {err}");
    if let Err(post_err) = GitHubClient::new(&settings)
        .post_comment(&target, &body)
        .await
    {
        error!("unable to post failure comment: {post_err:#}");
    }
}
