//! 프롬프트 테이블 로딩(기본 테이블, `PROMPTS` 환경변수, JSON 파일).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::prompt::{PromptSpec, default_prompts, prompts_from_overrides};

/// 우선순위: 명시한 파일 > `PROMPTS` 환경변수 > 기본 테이블.
pub fn load_prompt_table<F>(lookup: &F, prompts_file: Option<&str>) -> Result<Vec<PromptSpec>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = prompts_file {
        let path = Path::new(path);
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read prompts file {}", path.display()))?;
        debug!(path = %path.display(), "loading prompt table from file");
        return parse_table(&raw)
            .with_context(|| format!("invalid prompt table in {}", path.display()));
    }

    match lookup("PROMPTS").filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => parse_table(&raw).context("invalid prompt table in PROMPTS"),
        None => Ok(default_prompts()),
    }
}

fn parse_table(raw: &str) -> Result<Vec<PromptSpec>> {
    let table: BTreeMap<String, String> =
        serde_json::from_str(raw).context("expected a JSON object of name -> template")?;
    prompts_from_overrides(table)
}
