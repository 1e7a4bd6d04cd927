use std::path::PathBuf;

pub type IngestResult<T> = Result<T, IngestError>;

/// Failures while locating and reading statement files.
///
/// Every variant that concerns a particular statement carries its path so the
/// CLI can tell the user which export is broken.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("no statements matching {pattern:?} in {}", dir.display())]
    NoInputFiles { dir: PathBuf, pattern: String },
    #[error("no statement files to read")]
    NoStatementsGiven,
    #[error("participant name must not be empty")]
    EmptyParticipant,
    #[error("invalid statement pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed header in {}: {reason}", path.display())]
    MalformedHeader { path: PathBuf, reason: String },
    #[error("field {field:?} not found in header of {}", path.display())]
    MissingField { field: String, path: PathBuf },
    #[error("malformed record in {} at line {line}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error(
        "malformed record in {} at line {line}: expected {expected} fields, found {found}",
        path.display()
    )]
    RecordWidth {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.into(),
            source,
        }
    }
}
