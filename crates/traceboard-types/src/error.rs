use std::fmt;
use std::path::PathBuf;

/// Result type for traceboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across the analysis and dashboard layers.
///
/// Per-record and per-file problems never appear here; they accumulate in
/// `summary::Diagnostics` instead. Only conditions that prevent producing any
/// output at all are represented as errors.
#[derive(Debug)]
pub enum Error {
    /// IO operation on a specific path failed
    Io { path: PathBuf, source: std::io::Error },
    /// None of the given input files could be read
    NoReadableInput { attempted: Vec<PathBuf> },
    /// No summaries were given to merge or render
    NoSummaries,
    /// A serialized summary could not be decoded
    Summary { path: PathBuf, source: serde_json::Error },
    /// Writing an output artifact failed
    Output { path: PathBuf, message: String },
    /// Configuration problem
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "IO error on {}: {}", path.display(), source)
            }
            Error::NoReadableInput { attempted } => {
                let paths: Vec<String> =
                    attempted.iter().map(|p| p.display().to_string()).collect();
                write!(f, "no readable input file among: {}", paths.join(", "))
            }
            Error::NoSummaries => write!(f, "no metrics summaries given"),
            Error::Summary { path, source } => {
                write!(f, "invalid metrics summary {}: {}", path.display(), source)
            }
            Error::Output { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Summary { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn output(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Output { path: path.into(), message: message.into() }
    }
}
