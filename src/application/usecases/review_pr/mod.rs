//! 패치 획득부터 프롬프트 실행, 코멘트/리뷰 게시까지의 전체 오케스트레이션 유스케이스.

mod orchestrator;
mod patch;
mod publish;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use tracing::error;

use crate::application::config::ActionConfig;
use crate::application::errors::RunError;
use crate::application::ports::{
    CommentPoster, CompletionProvider, RefDiffer, Reporter, ReviewSubmitter, WorkspacePatchReader,
};
use crate::domain::patch::Patch;
use crate::domain::policy::check_patch_size;
use crate::domain::usage::UsageAccumulator;

pub use orchestrator::{PromptOrchestrator, PromptOutcome, PromptReport};
pub use patch::PatchAcquirer;

/// 실행 요약.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<PromptReport>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, PromptOutcome::Failed(_)))
            .count()
    }
}

/// 설정과 포트 구현체를 받아 한 번의 리뷰 실행을 조율한다.
pub struct ReviewPrUseCase {
    pub config: Arc<ActionConfig>,
    pub workspace_reader: Arc<dyn WorkspacePatchReader>,
    pub differ: Arc<dyn RefDiffer>,
    pub completion: Arc<dyn CompletionProvider>,
    pub comments: Arc<dyn CommentPoster>,
    pub reviews: Arc<dyn ReviewSubmitter>,
    pub usage: Arc<UsageAccumulator>,
    pub reporter: Arc<dyn Reporter>,
}

impl ReviewPrUseCase {
    /// 리뷰 본 실행 진입점.
    /// 패치 획득/크기 검사에 실패하면 진단 코멘트를 한 번 시도하고 어떤 프롬프트도 실행하지 않는다.
    pub async fn execute(&self) -> Result<RunSummary, RunError> {
        let config = &self.config;
        self.reporter.section("Session");
        self.reporter.kv("Target", &config.target.to_string());
        self.reporter.kv("Provider", self.completion.name());
        self.reporter.kv("Prompts", &config.prompts.len().to_string());
        if config.debug {
            self.reporter.kv("Debug", "prompts and responses are logged");
        }

        let patch = match self.load_patch().await {
            Ok(patch) => patch,
            Err(err) => {
                self.report_fatal(&err).await;
                return Err(err);
            }
        };

        self.reporter.section("Prompts");
        let orchestrator = PromptOrchestrator::new(
            config.target.clone(),
            Arc::clone(&self.completion),
            Arc::clone(&self.comments),
            Arc::clone(&self.reviews),
            Arc::clone(&self.usage),
            Arc::clone(&self.reporter),
        );
        let reports = orchestrator.run(&patch, &config.prompts).await;

        let summary = RunSummary { reports };
        self.reporter.section("Done");
        self.reporter.kv(
            "Succeeded",
            &(summary.reports.len() - summary.failed()).to_string(),
        );
        self.reporter.kv("Failed", &summary.failed().to_string());
        Ok(summary)
    }

    async fn load_patch(&self) -> Result<Patch, RunError> {
        let settings = &self.config.patch;
        self.reporter.section("Patch");
        self.reporter.kv("Base", &settings.base_ref);
        self.reporter.kv("Head", &settings.head_ref);

        let acquirer = PatchAcquirer {
            reader: self.workspace_reader.as_ref(),
            differ: self.differ.as_ref(),
        };
        let patch = acquirer
            .acquire(
                &settings.workspace_patch_path(),
                &settings.base_ref,
                &settings.head_ref,
            )
            .await?;

        self.reporter.kv("Patch Bytes", &patch.len().to_string());
        check_patch_size(&patch, settings.max_bytes)?;
        Ok(patch)
    }

    /// 치명적 오류를 PR 코멘트로 한 번 알린다. 게시 실패는 로그만 남긴다.
    async fn report_fatal(&self, err: &RunError) {
        error!("{err}");
        let body = format!(":x: {err}");
        if let Err(post_err) = self
            .comments
            .post_comment(&self.config.target, &body)
            .await
        {
            error!("unable to post failure comment: {post_err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::testing::{
        MockCompletion, MockGitHub, SilentReporter, StubDiffer, StubReader, target,
    };
    use super::*;
    use crate::application::config::{CompletionSettings, GitHubSettings, PatchSettings};
    use crate::domain::prompt::default_prompts;

    fn config(max_bytes: Option<usize>) -> ActionConfig {
        ActionConfig {
            target: target(),
            github: GitHubSettings {
                token: "gh".to_string(),
                api_base: "http://github.invalid".to_string(),
                timeout_secs: 5,
            },
            completion: CompletionSettings {
                token: "sk".to_string(),
                api_base: "http://openai.invalid".to_string(),
                model: "test".to_string(),
                timeout_secs: 5,
            },
            patch: PatchSettings {
                workspace_dir: PathBuf::from("/ws"),
                file_name: "patch".to_string(),
                base_ref: "main".to_string(),
                head_ref: "feature".to_string(),
                max_bytes,
            },
            prompts: default_prompts()
                .into_iter()
                .filter(|p| p.name != "Code review")
                .collect(),
            debug: false,
        }
    }

    fn use_case(
        config: ActionConfig,
        reader: StubReader,
        differ: StubDiffer,
        completion: &Arc<MockCompletion>,
        github: &Arc<MockGitHub>,
    ) -> ReviewPrUseCase {
        ReviewPrUseCase {
            config: Arc::new(config),
            workspace_reader: Arc::new(reader),
            differ: Arc::new(differ),
            completion: completion.clone(),
            comments: github.clone(),
            reviews: github.clone(),
            usage: Arc::new(UsageAccumulator::new()),
            reporter: Arc::new(SilentReporter),
        }
    }

    #[tokio::test]
    async fn patch_at_limit_is_dispatched() {
        let completion = Arc::new(MockCompletion::new().with_default("ok"));
        let github = Arc::new(MockGitHub::new(completion.events()));
        let uc = use_case(
            config(Some(5)),
            StubReader::ok("12345"),
            StubDiffer::ok("12345"),
            &completion,
            &github,
        );

        let summary = uc.execute().await.unwrap();
        assert_eq!(summary.reports.len(), 3);
        assert_eq!(summary.failed(), 0);
        assert_eq!(completion.prompts().len(), 3);
        assert_eq!(uc.usage.total(), 30);
    }

    #[tokio::test]
    async fn oversized_patch_aborts_before_any_completion() {
        let completion = Arc::new(MockCompletion::new().with_default("ok"));
        let github = Arc::new(MockGitHub::new(completion.events()));
        let uc = use_case(
            config(Some(5)),
            StubReader::ok("123456"),
            StubDiffer::failing("bad revision"),
            &completion,
            &github,
        );

        let err = uc.execute().await.unwrap_err();
        assert!(matches!(err, RunError::PatchTooLarge(_)));
        assert_eq!(err.exit_code(), 3);
        assert!(completion.prompts().is_empty());
        let comments = github.comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].contains("6 bytes"));
        assert!(comments[0].contains("5 bytes"));
    }

    #[tokio::test]
    async fn missing_patch_aborts_and_reports() {
        let completion = Arc::new(MockCompletion::new().with_default("ok"));
        let github = Arc::new(MockGitHub::new(completion.events()));
        let uc = use_case(
            config(None),
            StubReader::failing("no such file"),
            StubDiffer::failing("unknown revision"),
            &completion,
            &github,
        );

        let err = uc.execute().await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(completion.prompts().is_empty());
        let comments = github.comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].contains("no such file"));
        assert!(comments[0].contains("unknown revision"));
    }
}
