//! 적용 중인 프롬프트 테이블을 확인하는 유스케이스.

use anyhow::Result;

use crate::domain::prompt::PromptSpec;

/// 프롬프트 테이블(이름/종류/템플릿)을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectPromptsUseCase<'a> {
    pub prompts: &'a [PromptSpec],
}

impl<'a> InspectPromptsUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.prompts)?)
    }
}
