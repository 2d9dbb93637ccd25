//! Crate-level error types.

use std::fmt;

use crate::{gpu::render_context::GpuInitError, options::OptionsError};

/// Errors produced by the duplex crate.
///
/// All of them surface at startup; a running frame loop with valid options
/// has no error path.
#[derive(Debug)]
pub enum DuplexError {
    /// GPU context initialization failure.
    Gpu(GpuInitError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but violate a configuration invariant.
    InvalidOptions(OptionsError),
    /// WGSL shader composition failure.
    Shader(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for DuplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(e) => write!(f, "invalid options: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for DuplexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidOptions(e) => Some(e),
            Self::OptionsParse(_) | Self::Shader(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<GpuInitError> for DuplexError {
    fn from(e: GpuInitError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for DuplexError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<OptionsError> for DuplexError {
    fn from(e: OptionsError) -> Self {
        Self::InvalidOptions(e)
    }
}
