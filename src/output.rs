// src/output.rs
// =============================================================================
// Writes the final report file.
//
// The file is a pretty-printed JSON array with one object per branch:
//   [
//     {
//       "branch_name": "main",
//       "commit_sha": "a1",
//       "author": "alice",
//       "last_updated": "2024-03-01T12:00:00Z",
//       "is_merged": true,
//       "is_protected": true
//     }
//   ]
// An existing file at the same path is overwritten.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::github::BranchDetail;

pub fn write_report(path: &Path, details: &[BranchDetail]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(details)?;
    json.push('\n');

    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = details.len(), "report written");
    Ok(())
}
