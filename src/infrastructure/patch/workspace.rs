//! CI 이전 단계가 워크스페이스에 남긴 패치 파일 읽기.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::WorkspacePatchReader;
use crate::domain::patch::Patch;

#[derive(Debug, Default)]
pub struct WorkspaceFileReader;

#[async_trait]
impl WorkspacePatchReader for WorkspaceFileReader {
    async fn read_patch(&self, path: &Path) -> Result<Patch> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read patch file {}", path.display()))?;
        Ok(Patch::new(bytes))
    }
}
