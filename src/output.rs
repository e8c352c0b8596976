//! Writing the generated documents.
//!
//! Both files are pretty-printed with four-space indentation and replace
//! whatever was there before.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::launch::LaunchDocument;
use crate::tasks::TasksDocument;

pub const TASKS_FILE: &str = "tasks.json";
pub const LAUNCH_FILE: &str = "launch.json";

/// Renders `value` as JSON indented by four spaces.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("failed to serialize document")?;
    Ok(buf)
}

/// Truncates `path` and writes `value` into it.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = to_pretty_json(value)?;
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&data)
        .and_then(|_| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Writes `tasks.json` then `launch.json` into `dir`, returning the paths
/// written.
pub fn write_documents(
    dir: &Path,
    tasks: &TasksDocument,
    launch: &LaunchDocument,
) -> Result<[PathBuf; 2]> {
    let tasks_path = dir.join(TASKS_FILE);
    write_json(&tasks_path, tasks)?;
    let launch_path = dir.join(LAUNCH_FILE);
    write_json(&launch_path, launch)?;
    Ok([tasks_path, launch_path])
}
