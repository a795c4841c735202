//! Report sinks: the CI step summary, the snapshot file and the step outputs.

use std::path::Path;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::info;

use crate::prelude::*;

/// Append-only text buffer published to the step summary file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    buffer: String,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(text.as_ref());
        self
    }

    /// Current buffer contents.
    pub fn stringify(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Append the buffer to the summary file at `path` and empty the buffer.
    pub async fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        append(path.as_ref(), &self.buffer).await?;
        info!("Wrote summary to {}", path.as_ref().display());
        self.buffer.clear();
        Ok(())
    }
}

async fn append(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Write the report snapshot to `path`, replacing any previous one.
pub async fn write_snapshot(path: impl AsRef<Path>, report: &str) -> Result<()> {
    tokio::fs::write(path.as_ref(), report).await?;
    info!("Wrote compatibility matrix to {}", path.as_ref().display());
    Ok(())
}

/// Append `name=value` lines to the step outputs file at `path`.
pub async fn write_outputs(path: impl AsRef<Path>, outputs: &[(&str, String)]) -> Result<()> {
    let contents: String = outputs
        .iter()
        .map(|(name, value)| format!("{name}={value}\n"))
        .collect();
    append(path.as_ref(), &contents).await
}
