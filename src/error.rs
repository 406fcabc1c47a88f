//! Error taxonomy for device-control operations.
//!
//! Every failure reaches the caller as a value. Path and validation errors are
//! raised before anything is written. A failed write surfaces as
//! [`ControlError::WriteFailed`], [`ControlError::PermissionDenied`], or
//! [`ControlError::DeviceNotPresent`] when the file is gone.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ControlSurface, EffectMode};

/// Result type alias for control operations.
pub type Result<T> = std::result::Result<T, ControlError>;

/// A control surface whose file is missing on this machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{surface} not found at {}", .path.display())]
pub struct NotFound {
    pub surface: ControlSurface,
    pub path: PathBuf,
}

/// Why a user-supplied value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("{value} is out of range ({min}-{max})")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("unknown mode '{name}'; use one of: {}", mode_names())]
    UnknownMode { name: String },

    #[error("unsupported profile '{name}'; choices: {}", .choices.join(", "))]
    UnknownProfile { name: String, choices: Vec<String> },
}

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("{surface} is not available ({} missing). Is the linuwu_sense module loaded and is this feature supported?", .path.display())]
    DeviceNotPresent {
        surface: ControlSurface,
        path: PathBuf,
    },

    #[error("invalid {field}: {kind}")]
    InvalidInput {
        field: &'static str,
        #[source]
        kind: ValidationError,
    },

    #[error("permission denied on {}. Try running with sudo/root.", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ControlError {
    pub fn invalid(field: &'static str, kind: ValidationError) -> Self {
        Self::InvalidInput { field, kind }
    }

    /// Classifies a failed write. A file that vanished after resolution is
    /// reported as a missing device rather than a write failure.
    pub(crate) fn from_write(surface: ControlSurface, path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotFound => Self::DeviceNotPresent { surface, path },
            _ => Self::WriteFailed { path, source },
        }
    }

    pub(crate) fn from_read(surface: ControlSurface, path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotFound => Self::DeviceNotPresent { surface, path },
            _ => Self::ReadFailed { path, source },
        }
    }

    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceNotPresent { .. } => 2,
            Self::PermissionDenied { .. } => 3,
            Self::InvalidInput { .. } | Self::WriteFailed { .. } | Self::ReadFailed { .. } => 1,
        }
    }
}

fn mode_names() -> String {
    EffectMode::ALL.map(EffectMode::name).join(", ")
}

impl From<NotFound> for ControlError {
    fn from(err: NotFound) -> Self {
        Self::DeviceNotPresent {
            surface: err.surface,
            path: err.path,
        }
    }
}
