//! 도메인 정책(패치 선택 규칙, 패치 크기 제한).

use anyhow::{Result, bail};
use thiserror::Error;

use crate::domain::patch::Patch;

/// 두 패치 후보를 비교한 결과. 로그 출력용으로만 사용한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchDecision {
    /// 두 소스 모두 성공했고 내용이 같다.
    Equal,
    /// 두 소스 모두 성공했지만 내용이 다르다.
    Diverged,
    /// git diff만 실패했다.
    DiffFailed { cause: String },
    /// 워크스페이스 파일만 실패했다(그래도 워크스페이스 결과를 쓴다).
    WorkspaceFailed { cause: String },
}

#[derive(Debug, Clone)]
pub struct PatchSelection {
    pub patch: Patch,
    pub decision: PatchDecision,
}

/// 두 소스가 모두 실패했을 때의 결합 오류.
#[derive(Debug, Error)]
#[error("workspace patch: {workspace:#}; git diff: {diff:#}")]
pub struct PatchUnavailable {
    pub workspace: anyhow::Error,
    pub diff: anyhow::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("patch is too large: {size} bytes exceeds the limit of {limit} bytes")]
pub struct PatchTooLarge {
    pub size: usize,
    pub limit: usize,
}

/// 워크스페이스 패치(A)와 git diff 패치(B) 중 사용할 패치를 고른다.
///
/// 워크스페이스 결과가 항상 우선한다. A만 실패한 경우에도 B가 아니라
/// A의 (빈) 결과를 성공으로 돌려준다. 길이 0인 결과는 실패로 간주한다.
pub fn select_patch(
    workspace: Result<Patch>,
    diff: Result<Patch>,
) -> Result<PatchSelection, PatchUnavailable> {
    match (reject_empty(workspace), reject_empty(diff)) {
        (Ok(ws), Ok(fs)) => {
            let decision = if ws == fs {
                PatchDecision::Equal
            } else {
                PatchDecision::Diverged
            };
            Ok(PatchSelection {
                patch: ws,
                decision,
            })
        }
        (Ok(ws), Err(diff_err)) => Ok(PatchSelection {
            patch: ws,
            decision: PatchDecision::DiffFailed {
                cause: format!("{diff_err:#}"),
            },
        }),
        (Err(ws_err), Ok(_)) => Ok(PatchSelection {
            patch: Patch::default(),
            decision: PatchDecision::WorkspaceFailed {
                cause: format!("{ws_err:#}"),
            },
        }),
        (Err(workspace), Err(diff)) => Err(PatchUnavailable { workspace, diff }),
    }
}

/// 크기 제한을 검사한다. `limit`이 없으면 제한하지 않는다.
pub fn check_patch_size(patch: &Patch, limit: Option<usize>) -> Result<(), PatchTooLarge> {
    match limit {
        Some(limit) if patch.len() > limit => Err(PatchTooLarge {
            size: patch.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

fn reject_empty(result: Result<Patch>) -> Result<Patch> {
    let patch = result?;
    if patch.is_empty() {
        bail!("patch empty");
    }
    Ok(patch)
}
