//! 프롬프트 템플릿 테이블과 출력 종류.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::Serialize;

/// 템플릿 안에서 패치가 들어갈 자리.
pub const PATCH_PLACEHOLDER: &str = "%s";

/// 구조화 리뷰로 게시되는 기본 프롬프트 이름.
pub const CODE_REVIEW_PROMPT: &str = "Code review";

/// 완료 결과를 어디로 보낼지 결정하는 출력 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// 일반 이슈 코멘트
    Comment,
    /// 인라인 제안이 달린 PR 리뷰
    Review,
}

impl PromptKind {
    /// 이름만으로 종류를 추론한다. 알려진 리뷰 키가 아니면 Comment.
    pub fn infer(name: &str) -> Self {
        if name == CODE_REVIEW_PROMPT {
            Self::Review
        } else {
            Self::Comment
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSpec {
    pub name: String,
    pub template: String,
    pub kind: PromptKind,
}

impl PromptSpec {
    /// 템플릿에 삽입 지점이 정확히 하나인지 검사한 뒤 생성한다.
    pub fn new(name: impl Into<String>, template: impl Into<String>, kind: PromptKind) -> Result<Self> {
        let name = name.into();
        let template = template.into();
        if name.trim().is_empty() {
            bail!("prompt name must not be empty");
        }
        let slots = template.matches(PATCH_PLACEHOLDER).count();
        if slots != 1 {
            bail!("prompt '{name}' must contain exactly one {PATCH_PLACEHOLDER} placeholder, found {slots}");
        }
        Ok(Self {
            name,
            template,
            kind,
        })
    }

    /// 삽입 지점에 패치 텍스트를 넣은 최종 프롬프트.
    pub fn render(&self, patch_text: &str) -> String {
        self.template.replacen(PATCH_PLACEHOLDER, patch_text, 1)
    }
}

/// 기본 프롬프트 테이블.
pub fn default_prompts() -> Vec<PromptSpec> {
    [
        (
            "Unit tests",
            "If there are any new functions in this patch, write a unit test for each of them\n\n%s",
            PromptKind::Comment,
        ),
        (
            CODE_REVIEW_PROMPT,
            REVIEW_TEMPLATE,
            PromptKind::Review,
        ),
        (
            "Scalability review",
            "Review the given patch for potential scalability issues:\n\n%s",
            PromptKind::Comment,
        ),
        (
            "Security review",
            "Review the given patch for potential security issues:\n\n%s",
            PromptKind::Comment,
        ),
    ]
    .into_iter()
    .map(|(name, template, kind)| PromptSpec {
        name: name.to_string(),
        template: template.to_string(),
        kind,
    })
    .collect()
}

/// 사용자 지정 테이블(이름 -> 템플릿)을 PromptSpec 목록으로 변환한다.
/// 종류는 이 시점에 한 번만 결정된다.
pub fn prompts_from_overrides(overrides: BTreeMap<String, String>) -> Result<Vec<PromptSpec>> {
    if overrides.is_empty() {
        bail!("prompt override table is empty");
    }
    overrides
        .into_iter()
        .map(|(name, template)| {
            let kind = PromptKind::infer(&name);
            PromptSpec::new(name, template, kind)
        })
        .collect()
}

const REVIEW_TEMPLATE: &str = r#"Please perform a code review for this patch.
Answer ONLY with a JSON array of review comments and nothing else. Each element must have the fields
"path" (file path in the patch), "body" (the suggestion), "side" ("LEFT" or "RIGHT"), "line" (line number),
and optionally "start_side" and "start_line" for comments spanning multiple lines.
Return [] when there is nothing to suggest.

%s"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_one_review_prompt() {
        let prompts = default_prompts();
        assert_eq!(prompts.len(), 4);
        let reviews: Vec<_> = prompts
            .iter()
            .filter(|p| p.kind == PromptKind::Review)
            .collect();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].name, CODE_REVIEW_PROMPT);
    }

    #[test]
    fn default_templates_have_single_placeholder() {
        for prompt in default_prompts() {
            assert_eq!(prompt.template.matches(PATCH_PLACEHOLDER).count(), 1, "{}", prompt.name);
        }
    }

    #[test]
    fn render_substitutes_only_the_placeholder() {
        let spec = PromptSpec::new("x", "look at:\n%s\nthanks", PromptKind::Comment).unwrap();
        assert_eq!(spec.render("+a %s b"), "look at:\n+a %s b\nthanks");
    }

    #[test]
    fn rejects_templates_without_or_with_many_placeholders() {
        assert!(PromptSpec::new("x", "no slot", PromptKind::Comment).is_err());
        assert!(PromptSpec::new("x", "%s and %s", PromptKind::Comment).is_err());
        assert!(PromptSpec::new(" ", "%s", PromptKind::Comment).is_err());
    }

    #[test]
    fn overrides_infer_kind_from_name() {
        let overrides = BTreeMap::from([
            ("Code review".to_string(), "review %s".to_string()),
            ("Docs".to_string(), "document %s".to_string()),
        ]);
        let prompts = prompts_from_overrides(overrides).unwrap();
        let kinds: Vec<_> = prompts.iter().map(|p| (p.name.as_str(), p.kind)).collect();
        assert_eq!(
            kinds,
            vec![("Code review", PromptKind::Review), ("Docs", PromptKind::Comment)]
        );
    }

    #[test]
    fn empty_override_table_is_rejected() {
        assert!(prompts_from_overrides(BTreeMap::new()).is_err());
    }
}
