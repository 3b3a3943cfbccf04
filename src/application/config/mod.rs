//! 애플리케이션이 사용하는 실행 설정(순수 데이터).
//!
//! 주의: 환경변수/파일 접근은 `infrastructure::config`에서만 수행한다.

use std::path::PathBuf;

use crate::domain::prompt::PromptSpec;
use crate::domain::target::PullRequestTarget;

pub const DEFAULT_MAX_PATCH_BYTES: usize = 120_000;
pub const DEFAULT_PATCH_FILE_NAME: &str = "patch";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// 한 번 로딩된 뒤 변경되지 않는 실행 설정.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// 게시 대상 PR
    pub target: PullRequestTarget,
    pub github: GitHubSettings,
    pub completion: CompletionSettings,
    pub patch: PatchSettings,
    /// 프롬프트 테이블(종류는 로딩 시점에 확정)
    pub prompts: Vec<PromptSpec>,
    /// 프롬프트/응답 디버그 출력 여부
    pub debug: bool,
}

#[derive(Clone)]
pub struct GitHubSettings {
    pub token: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct CompletionSettings {
    pub token: String,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PatchSettings {
    /// 워크스페이스 디렉터리(GITHUB_WORKSPACE)
    pub workspace_dir: PathBuf,
    /// 워크스페이스 안의 패치 파일 이름
    pub file_name: String,
    pub base_ref: String,
    pub head_ref: String,
    /// `None`이면 크기 제한 없음
    pub max_bytes: Option<usize>,
}

impl PatchSettings {
    pub fn workspace_patch_path(&self) -> PathBuf {
        self.workspace_dir.join(&self.file_name)
    }
}

// 토큰이 로그에 찍히지 않도록 Debug를 직접 구현한다.
impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &"***")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("token", &"***")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
