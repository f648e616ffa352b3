//! Error types shared by the planner.

use std::fmt;

use thiserror::Error;

/// Which reference table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Crop,
    System,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Crop => write!(f, "Crop"),
            RecordKind::System => write!(f, "System"),
        }
    }
}

/// Everything that can go wrong while planning a farm.
///
/// Only [`SimError::Validation`], [`SimError::NotFound`] and
/// [`SimError::DataLoad`] ever reach the caller of the engine. External
/// service failures are recovered by the collaborator that hit them.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// The farm configuration was rejected before any computation.
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// A crop or system id is not present in the reference tables.
    #[error("{kind} ID {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// Reference data is missing or malformed.
    #[error("failed to load {source_name}: {message}")]
    DataLoad { source_name: String, message: String },

    /// An advisor or environment lookup failed.
    #[error("external service error: {0}")]
    ExternalService(String),
}

impl SimError {
    pub fn data_load(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        SimError::DataLoad {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        SimError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
