//! 워크스페이스 저장소에서 `git diff <base> <head>`를 실행하는 diff 원천.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::RefDiffer;
use crate::domain::patch::Patch;

pub struct GitDiffer {
    workdir: PathBuf,
}

impl GitDiffer {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl RefDiffer for GitDiffer {
    async fn diff(&self, base_ref: &str, head_ref: &str) -> Result<Patch> {
        debug!(base_ref, head_ref, workdir = %self.workdir.display(), "running git diff");
        let output = Command::new("git")
            .arg("diff")
            .arg(base_ref)
            .arg(head_ref)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("failed to spawn git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!(
                "git diff {} {} failed ({}): {}",
                base_ref,
                head_ref,
                output.status,
                if stderr.is_empty() {
                    "no stderr output"
                } else {
                    stderr.as_str()
                }
            );
        }

        Ok(Patch::new(output.stdout))
    }
}
