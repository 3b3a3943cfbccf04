//! 실행 오류 분류.
//!
//! `RunError`는 실행 전체를 중단시키는 치명적 오류이고,
//! `PromptTaskError`는 해당 프롬프트 작업에서만 끝나는 오류다.

use thiserror::Error;

use crate::domain::policy::{PatchTooLarge, PatchUnavailable};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
    #[error("unable to get patch: {0}")]
    Patch(#[from] PatchUnavailable),
    #[error(transparent)]
    PatchTooLarge(#[from] PatchTooLarge),
}

impl RunError {
    /// 오류 종류별 프로세스 종료 코드.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Patch(_) => 2,
            Self::PatchTooLarge(_) => 3,
        }
    }
}

/// 외부 API가 실패 상태 코드를 돌려줬을 때 어댑터가 반환하는 오류.
/// 오케스트레이터는 `downcast_ref`로 응답 본문을 꺼내 보고한다.
#[derive(Debug, Clone, Error)]
#[error("{service} responded with status {status}")]
pub struct HttpStatusError {
    pub service: &'static str,
    pub status: u16,
    pub body: String,
}

impl HttpStatusError {
    /// 오류 체인에서 응답 본문을 찾는다.
    pub fn body_of(err: &anyhow::Error) -> Option<String> {
        err.downcast_ref::<Self>()
            .map(|e| e.body.clone())
            .filter(|body| !body.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum PromptTaskError {
    #[error("unable to prompt the completion provider for '{prompt_name}': {cause}")]
    CompletionFailure { prompt_name: String, cause: String },

    #[error("no or empty response for '{prompt_name}'")]
    EmptyResponse { prompt_name: String, raw: String },

    #[error("unable to parse review comments for '{prompt_name}': {cause}")]
    ReviewParseFailure {
        prompt_name: String,
        cause: String,
        raw_text: String,
    },

    #[error("problem creating code review for '{prompt_name}': {cause}")]
    ReviewCreateFailure {
        prompt_name: String,
        cause: String,
        response_body: Option<String>,
    },

    #[error("problem submitting code review for '{prompt_name}': {cause}")]
    ReviewSubmitFailure {
        prompt_name: String,
        cause: String,
        response_body: Option<String>,
    },

    #[error("unable to post comment for '{prompt_name}': {cause}")]
    CommentPostFailure { prompt_name: String, cause: String },

    #[error("prompt task '{prompt_name}' did not finish: {cause}")]
    TaskAborted { prompt_name: String, cause: String },
}

impl PromptTaskError {
    pub fn prompt_name(&self) -> &str {
        match self {
            Self::CompletionFailure { prompt_name, .. }
            | Self::EmptyResponse { prompt_name, .. }
            | Self::ReviewParseFailure { prompt_name, .. }
            | Self::ReviewCreateFailure { prompt_name, .. }
            | Self::ReviewSubmitFailure { prompt_name, .. }
            | Self::CommentPostFailure { prompt_name, .. }
            | Self::TaskAborted { prompt_name, .. } => prompt_name,
        }
    }

    /// PR에 남길 진단 코멘트 본문.
    pub fn report_markdown(&self) -> String {
        let mut out = format!("## {}\n:warning: {}", self.prompt_name(), self);
        let details = match self {
            Self::EmptyResponse { raw, .. } => Some(("Raw response", Some(raw.as_str()))),
            Self::ReviewParseFailure { raw_text, .. } => {
                Some(("Response text", Some(raw_text.as_str())))
            }
            Self::ReviewCreateFailure { response_body, .. }
            | Self::ReviewSubmitFailure { response_body, .. } => {
                Some(("Response body", response_body.as_deref()))
            }
            _ => None,
        };
        if let Some((label, Some(text))) = details {
            out.push_str(&format!("\n\n{label}:\n```\n{}\n```", text.trim()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn exit_codes_differ_per_category() {
        let config = RunError::Config(anyhow!("missing token"));
        let patch = RunError::Patch(PatchUnavailable {
            workspace: anyhow!("a"),
            diff: anyhow!("b"),
        });
        let size = RunError::PatchTooLarge(PatchTooLarge { size: 2, limit: 1 });
        assert_eq!(config.exit_code(), 1);
        assert_eq!(patch.exit_code(), 2);
        assert_eq!(size.exit_code(), 3);
    }

    #[test]
    fn report_includes_raw_response() {
        let err = PromptTaskError::EmptyResponse {
            prompt_name: "Unit tests".to_string(),
            raw: "Completion { choices: [] }".to_string(),
        };
        let report = err.report_markdown();
        assert!(report.starts_with("## Unit tests\n"));
        assert!(report.contains("Completion { choices: [] }"));
    }

    #[test]
    fn finds_status_body_through_context() {
        use anyhow::Context;

        let err = Err::<(), _>(HttpStatusError {
            service: "github",
            status: 422,
            body: "{\"message\":\"Validation Failed\"}".to_string(),
        })
        .context("github: failed to create review")
        .unwrap_err();
        assert_eq!(
            HttpStatusError::body_of(&err).as_deref(),
            Some("{\"message\":\"Validation Failed\"}")
        );
        assert_eq!(HttpStatusError::body_of(&anyhow!("plain")), None);
    }

    #[test]
    fn report_without_body_has_no_details_block() {
        let err = PromptTaskError::ReviewSubmitFailure {
            prompt_name: "Code review".to_string(),
            cause: "timeout".to_string(),
            response_body: None,
        };
        assert!(!err.report_markdown().contains("```"));
    }
}
