//! Common error infrastructure for combat-core.
//!
//! Domain errors (`FixedPointError`, `ArmyError`, `ParameterError`) live next
//! to the code that raises them. This module provides the shared severity
//! classification and the trait every one of them implements.
//!
//! The engine is a total function over its documented input domain. Inputs
//! outside that domain are reported, never clamped.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: unknown troop type code, zero curve width
    Validation,

    /// Arithmetic limits were exceeded while converting constants.
    ///
    /// Examples: fixed-point numerator too large to scale
    Internal,

    /// Configuration is unusable and no computation can proceed.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or corrupted input source.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who must fix the input, not on impact
/// - Error codes are stable SCREAMING_SNAKE identifiers
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
