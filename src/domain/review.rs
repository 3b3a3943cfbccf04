//! 리뷰 도메인 엔티티/값 객체.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// GitHub에 게시하지 않고 콘솔에만 출력
    pub dry_run: bool,
    /// 프롬프트/응답 디버그 출력
    pub debug: bool,
    /// 프롬프트 테이블 JSON 파일 경로
    pub prompts_file: Option<String>,
    /// MAX_PATCH_SIZE 대신 사용할 크기 제한
    pub max_patch_bytes: Option<usize>,
}

/// completion provider의 응답. 선택지 본문과 토큰 사용량만 다룬다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub choices: Vec<String>,
    pub token_usage: u64,
}

impl Completion {
    /// 첫 번째 선택지가 비어 있지 않을 때만 본문을 돌려준다.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(String::as_str)
            .filter(|content| !content.is_empty())
    }
}

/// diff의 어느 쪽 줄에 코멘트를 달지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewSide {
    Left,
    Right,
}

/// 인라인 리뷰 코멘트 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub path: String,
    pub body: String,
    pub side: ReviewSide,
    pub line: u64,
    #[serde(default, alias = "startSide", skip_serializing_if = "Option::is_none")]
    pub start_side: Option<ReviewSide>,
    #[serde(default, alias = "startLine", skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u64>,
}

/// 리뷰 제출 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEvent {
    RequestChanges,
}

impl ReviewEvent {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::RequestChanges => "REQUEST_CHANGES",
        }
    }
}

/// Review 종류 응답을 인라인 코멘트 배열로 해석한다.
/// 응답이 ```json 코드 펜스로 감싸져 있으면 벗겨낸다.
pub fn parse_review_comments(content: &str) -> serde_json::Result<Vec<ReviewComment>> {
    serde_json::from_str(strip_code_fence(content))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // 첫 줄은 언어 태그(json 등)
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}
