//! Report rendering and output sinks.
//!
//! Both documents are rendered before anything is written. `DirSink` stages
//! every document in a temporary file next to its target and only renames
//! them into place once all of them are fully written, so a render or write
//! failure leaves the previous reports untouched. A failing rename can still
//! leave the earlier documents replaced.

use crate::error::{Error, Result};
use crate::model::{Report, TestData};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const TESTS_FILE: &str = "tests.json";
pub const ORPHANS_FILE: &str = "orphan.json";

/// Destination for rendered documents, written as one batch.
pub trait OutputSink {
    fn write(&mut self, documents: &[(&str, String)]) -> Result<()>;
}

/// Writes documents into a directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DirSink {
    fn stage(&self, name: &str, contents: &str) -> Result<(NamedTempFile, PathBuf)> {
        let path = self.dir.join(name);
        let write_err = |source| Error::Write {
            path: path.clone(),
            source,
        };
        let parent = path.parent().unwrap_or(self.dir.as_path());
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        Ok((tmp, path))
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, documents: &[(&str, String)]) -> Result<()> {
        // Temp files are removed on drop if anything below fails.
        let staged = documents
            .iter()
            .map(|(name, contents)| self.stage(name, contents))
            .collect::<Result<Vec<_>>>()?;
        for (tmp, path) in staged {
            tmp.persist(&path).map_err(|e| Error::Write {
                path,
                source: e.error,
            })?;
        }
        Ok(())
    }
}

/// Keeps documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
}

impl OutputSink for MemorySink {
    fn write(&mut self, documents: &[(&str, String)]) -> Result<()> {
        for (name, contents) in documents {
            self.files.insert(name.to_string(), contents.clone());
        }
        Ok(())
    }
}

/// Pretty-printed JSON array with 2-space indentation.
pub fn render_json(files: &[TestData]) -> Result<String> {
    Ok(serde_json::to_string_pretty(files)?)
}

/// Render both documents, then write them. Returns the names written.
pub fn write_report(report: &Report, sink: &mut dyn OutputSink) -> Result<[&'static str; 2]> {
    let documents = [
        (TESTS_FILE, render_json(&report.documented)?),
        (ORPHANS_FILE, render_json(&report.orphans)?),
    ];
    sink.write(&documents)?;
    Ok([TESTS_FILE, ORPHANS_FILE])
}
