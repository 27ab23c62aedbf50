//! Failure reporting for value based removal.
//!
//! [`crate::nodemap::NodeMap::remove`] returns a [`RemoveError`]. Callers
//! that only want the failure noted somewhere can use
//! [`crate::nodemap::NodeMap::remove_or_report`] with a [`Diagnostics`]
//! sink instead. [`LogDiagnostics`] sends those notes to the `log` facade.

use std::error::Error;
use std::fmt;

/// Why a value could not be removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveError {
    /// The map holds no entries.
    Empty,
    /// No entry holds an equal value.
    NotFound,
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveError::Empty => write!(f, "No keys in node map"),
            RemoveError::NotFound => write!(f, "Key was not found for value"),
        }
    }
}

impl Error for RemoveError {}

/// Receives error level messages. Must not panic.
pub trait Diagnostics {
    fn error(&self, args: fmt::Arguments<'_>);
}

/// Forwards messages to `log::error!` with the `nodemap` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: "nodemap", "{}", args);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }
}
