//! 환경변수 기반 `ActionConfig` 로더.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::application::config::{
    ActionConfig, CompletionSettings, DEFAULT_GITHUB_API_BASE, DEFAULT_MAX_PATCH_BYTES,
    DEFAULT_OPENAI_API_BASE, DEFAULT_OPENAI_MODEL, DEFAULT_PATCH_FILE_NAME,
    DEFAULT_REQUEST_TIMEOUT_SECS, GitHubSettings, PatchSettings,
};
use crate::domain::review::RunOptions;
use crate::domain::target::PullRequestTarget;

use super::prompts::load_prompt_table;

/// 실제 프로세스 환경변수 조회.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// 환경변수와 CLI 옵션으로 실행 설정을 구성한다.
pub fn load_action_config<F>(lookup: F, options: &RunOptions) -> Result<ActionConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let target = load_target(&lookup)?;
    let timeout_secs = parse_timeout(&lookup)?;

    let github = GitHubSettings {
        token: required(&lookup, "GITHUB_TOKEN")?,
        api_base: endpoint(&lookup, "GITHUB_API_URL", DEFAULT_GITHUB_API_BASE)?,
        timeout_secs,
    };
    let completion = CompletionSettings {
        token: required(&lookup, "OPENAI_TOKEN")?,
        api_base: endpoint(&lookup, "OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE)?,
        model: optional(&lookup, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        timeout_secs,
    };

    let max_bytes = match options.max_patch_bytes {
        Some(limit) => limit,
        None => match optional(&lookup, "MAX_PATCH_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MAX_PATCH_SIZE must be a byte count, got '{raw}'"))?,
            None => DEFAULT_MAX_PATCH_BYTES,
        },
    };
    let patch = PatchSettings {
        workspace_dir: optional(&lookup, "GITHUB_WORKSPACE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        file_name: optional(&lookup, "PATCH_FILE_NAME")
            .unwrap_or_else(|| DEFAULT_PATCH_FILE_NAME.to_string()),
        base_ref: required(&lookup, "GITHUB_BASE_REF")?,
        head_ref: required(&lookup, "GITHUB_HEAD_REF")?,
        // 0은 크기 제한을 끈다.
        max_bytes: (max_bytes > 0).then_some(max_bytes),
    };

    let prompts = load_prompt_table(&lookup, options.prompts_file.as_deref())?;

    Ok(ActionConfig {
        target,
        github,
        completion,
        patch,
        prompts,
        debug: options.debug || optional(&lookup, "DEBUG").is_some(),
    })
}

/// 전체 설정 로딩이 실패했을 때 진단 코멘트를 남길 수 있을 만큼의 설정을 찾는다.
pub fn load_fallback_github<F>(lookup: F) -> Option<(PullRequestTarget, GitHubSettings)>
where
    F: Fn(&str) -> Option<String>,
{
    let target = load_target(&lookup).ok()?;
    let settings = GitHubSettings {
        token: optional(&lookup, "GITHUB_TOKEN")?,
        api_base: endpoint(&lookup, "GITHUB_API_URL", DEFAULT_GITHUB_API_BASE).ok()?,
        timeout_secs: parse_timeout(&lookup).unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    };
    Some((target, settings))
}

fn load_target<F>(lookup: &F) -> Result<PullRequestTarget>
where
    F: Fn(&str) -> Option<String>,
{
    let repository = required(lookup, "GITHUB_REPOSITORY")?;
    let git_ref = required(lookup, "GITHUB_REF")?;
    PullRequestTarget::from_ci(&repository, &git_ref)
}

fn parse_timeout<F>(lookup: &F) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = optional(lookup, "REQUEST_TIMEOUT_SECS") else {
        return Ok(DEFAULT_REQUEST_TIMEOUT_SECS);
    };
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a number of seconds, got '{raw}'"))?;
    if secs == 0 {
        bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
    }
    Ok(secs)
}

fn endpoint<F>(lookup: &F, key: &str, default: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = optional(lookup, key).unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw).with_context(|| format!("{key} is not a valid URL: '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must use http or https, got '{raw}'");
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).with_context(|| format!("{key} is not set"))
}

/// 비어 있는 값은 설정되지 않은 것으로 본다.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
