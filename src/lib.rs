//! patchpilot library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::sync::Arc;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::errors::RunError;
use application::usecases::review_pr::RunSummary;
use domain::review::RunOptions;
use domain::usage::UsageAccumulator;
use infrastructure::config::{load_action_config, load_prompt_table, process_env};
use interface::composition::{AppComposition, inspect_prompts_usecase, report_config_error};

/// 프로세스 환경으로 설정을 읽어 한 번의 리뷰를 실행한다.
/// 토큰 사용량은 실패 여부와 상관없이 `usage`에 누적된다.
pub async fn run(options: RunOptions, usage: Arc<UsageAccumulator>) -> Result<RunSummary, RunError> {
    let config = match load_action_config(process_env, &options) {
        Ok(config) => config,
        Err(err) => {
            let err = RunError::Config(err);
            report_config_error(process_env, &err, options.dry_run).await;
            return Err(err);
        }
    };

    let composition = AppComposition::new(config, usage, options.dry_run);
    composition.review_usecase().execute().await
}

/// 적용될 프롬프트 테이블 JSON. 토큰 등 나머지 설정은 필요 없다.
pub fn inspect_prompts_pretty_json(options: &RunOptions) -> Result<String> {
    let prompts = load_prompt_table(&process_env, options.prompts_file.as_deref())?;
    inspect_prompts_usecase(&prompts).execute()
}
