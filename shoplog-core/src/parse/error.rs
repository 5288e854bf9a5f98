use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to open log file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log line {line_no}: {source}")]
    Read {
        line_no: usize,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Classification
    //-------------------------------------------------------------------------
    #[error("line {line_no} has no client identifier: {line}")]
    MalformedLine { line_no: usize, line: String },

    //-------------------------------------------------------------------------
    // Workers
    //-------------------------------------------------------------------------
    #[error("failed to spawn parse worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("parse worker panicked")]
    WorkerPanicked,
}

impl ParseError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line_no: usize, line: &str) -> Self {
        Self::MalformedLine {
            line_no,
            line: line.to_string(),
        }
    }

    pub fn is_malformed_line(&self) -> bool {
        matches!(self, Self::MalformedLine { .. })
    }
}
