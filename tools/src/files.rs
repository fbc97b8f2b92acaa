//! Decoding captured datagram files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codec::{CodecLimits, Decoder, DecoderStats};
use glob::Pattern;

use crate::message::{to_message, Message};

/// Outcome of decoding a sequence of datagram files.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    /// Messages in decode order.
    pub messages: Vec<Message>,
    /// Files rejected by datagram framing.
    pub failures: Vec<FileFailure>,
    pub stats: DecoderStats,
}

/// A datagram file that could not be framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Decodes each file as one datagram, in the given order.
///
/// All files share one decoder, so a message fragmented over several files
/// is reassembled. A malformed datagram is recorded and skipped.
///
/// # Errors
///
/// Returns an error if a file can't be read.
pub fn decode_files<P: AsRef<Path>>(paths: &[P], limits: &CodecLimits) -> Result<DecodeReport> {
    let mut decoder = Decoder::new(limits.clone());
    let mut report = DecodeReport::default();

    for path in paths {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read datagram {}", path.display()))?;
        match decoder.decode_datagram(&bytes) {
            Ok(messages) => report.messages.extend(messages.iter().map(to_message)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping malformed datagram");
                report.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
            }
        }
    }

    report.stats = decoder.stats();
    Ok(report)
}

/// Lists the regular files of `dir`, sorted by name.
///
/// With a pattern, only files whose path or file name matches are kept.
///
/// # Errors
///
/// Returns an error for an invalid pattern or an unreadable directory.
pub fn collect_datagram_paths(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}
