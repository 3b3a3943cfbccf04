//! 패치 획득 단계(워크스페이스 파일 + git diff).

use std::path::Path;

use tracing::{info, warn};

use crate::application::ports::{RefDiffer, WorkspacePatchReader};
use crate::domain::patch::Patch;
use crate::domain::policy::{PatchDecision, PatchUnavailable, select_patch};

/// 두 패치 소스를 함께 조회하고 선택 정책을 적용한다.
pub struct PatchAcquirer<'a> {
    pub reader: &'a dyn WorkspacePatchReader,
    pub differ: &'a dyn RefDiffer,
}

impl<'a> PatchAcquirer<'a> {
    pub async fn acquire(
        &self,
        workspace_patch_path: &Path,
        base_ref: &str,
        head_ref: &str,
    ) -> Result<Patch, PatchUnavailable> {
        let (workspace, diff) = futures::future::join(
            self.reader.read_patch(workspace_patch_path),
            self.differ.diff(base_ref, head_ref),
        )
        .await;

        let selection = select_patch(workspace, diff)?;
        match &selection.decision {
            PatchDecision::Equal => {
                info!("patches are equal, using the one provided via workspace");
            }
            PatchDecision::Diverged => {
                warn!("patches differ, using the one provided via workspace");
            }
            PatchDecision::DiffFailed { cause } => {
                warn!("problem getting patch from git diff, fallback to workspace: {cause}");
            }
            PatchDecision::WorkspaceFailed { cause } => {
                // 워크스페이스 실패 시에도 git diff 결과를 쓰지 않는다.
                warn!(
                    "problem getting patch from workspace, keeping the (empty) workspace result: {cause}"
                );
            }
        }
        Ok(selection.patch)
    }
}
