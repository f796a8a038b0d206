//! Directory traversal — find UI test sources and scan each one.

use crate::error::{Error, Result};
use crate::model::{Report, Test, TestData};
use crate::parser::{scan_lines, FileScan};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Path fragment every scanned file must contain.
const PATH_MARKER: &str = "UITests";
const SOURCE_EXTENSION: &str = ".swift";

/// Whether a non-directory entry at `path` should be scanned.
pub fn is_ui_test_source(path: &Path) -> bool {
    let full = path.to_string_lossy();
    let named_swift = path
        .file_name()
        .map(|n| n.to_string_lossy().ends_with(SOURCE_EXTENSION))
        .unwrap_or(false);
    full.contains(PATH_MARKER) && named_swift
}

/// Walk `root` and scan every qualifying file.
///
/// Fails on the first unreadable entry; nothing collected so far is returned.
pub fn scan_tree(root: &Path) -> Result<Report> {
    let mut report = Report::default();
    let mut scanned = 0usize;

    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Traversal {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() || !is_ui_test_source(entry.path()) {
            continue;
        }

        let scan = scan_file(entry.path())?;
        scanned += 1;
        debug!(
            path = %entry.path().display(),
            documented = scan.documented.len(),
            orphans = scan.orphans.len(),
            "scanned file"
        );

        let filename = entry.file_name().to_string_lossy().to_string();
        let filepath = entry.path().to_string_lossy().to_string();
        push_nonempty(&mut report.documented, &filename, &filepath, scan.documented);
        push_nonempty(&mut report.orphans, &filename, &filepath, scan.orphans);
    }

    info!(files = scanned, "scan complete");
    Ok(report)
}

/// Scan one file, reading it line by line.
///
/// Invalid UTF-8 is replaced rather than rejected; only I/O failures error.
pub fn scan_file(path: &Path) -> Result<FileScan> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let lines = read_lines_lossy(BufReader::new(file)).map_err(read_err)?;
    Ok(scan_lines(lines))
}

fn read_lines_lossy<R: BufRead>(mut reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(lines);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
}

fn push_nonempty(list: &mut Vec<TestData>, filename: &str, filepath: &str, tests: Vec<Test>) {
    if tests.is_empty() {
        return;
    }
    list.push(TestData {
        filename: filename.to_string(),
        filepath: filepath.to_string(),
        tests,
    });
}
