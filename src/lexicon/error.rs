//! Error types
//!
//! Loading a dictionary never fails (see
//! [`LoadStatus`](super::dictionary::LoadStatus)); everything else that can go
//! wrong during a pass is described here.

use std::fmt;
use std::path::PathBuf;

/// Failure to persist the dictionary or an output artifact
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem error while writing `path`
    Io { path: PathBuf, source: std::io::Error },
    /// The state could not be encoded
    Serialize(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io { path, source } => {
                write!(f, "IO error on {}: {}", path.display(), source)
            }
            PersistError::Serialize(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io { source, .. } => Some(source),
            PersistError::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Serialize(err)
    }
}

/// Failure of a [`Resolver`](super::resolver::Resolver) to produce a category
#[derive(Debug)]
pub enum ResolveError {
    /// The input stream ended before a valid choice was made
    InputClosed,
    /// Reading the answer or writing the menu failed
    Io(std::io::Error),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InputClosed => write!(f, "input closed before a category was chosen"),
            ResolveError::Io(err) => write!(f, "prompt IO error: {}", err),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io(err)
    }
}

/// Failure that aborts an ingestion pass
#[derive(Debug)]
pub enum SessionError {
    /// The input document does not exist
    InputNotFound(PathBuf),
    /// The input document exists but could not be read
    InputUnreadable { path: PathBuf, source: std::io::Error },
    /// Persisting the dictionary failed
    Dictionary(PersistError),
    /// An unknown lexeme could not be resolved
    Resolve(ResolveError),
    /// Writing the output artifact failed
    Output(PersistError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InputNotFound(path) => {
                write!(f, "input file not found: {}", path.display())
            }
            SessionError::InputUnreadable { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            SessionError::Dictionary(err) => write!(f, "could not save dictionary: {}", err),
            SessionError::Resolve(err) => write!(f, "classification aborted: {}", err),
            SessionError::Output(err) => write!(f, "could not write output: {}", err),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ResolveError> for SessionError {
    fn from(err: ResolveError) -> Self {
        SessionError::Resolve(err)
    }
}
