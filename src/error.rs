//! Error types for configuration loading and interactive edits.
//!
//! The simulation step itself cannot fail; only the surfaces that take
//! outside input do.

use std::fmt;

use crate::simulator::ParticleId;

/// Errors that can occur while loading a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    Io(std::io::Error),
    /// The file is not valid YAML for the config schema.
    Parse(serde_yaml::Error),
    /// A value is outside the range the simulation accepts.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors returned by the simulator's edit API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// No particle with this id exists.
    UnknownParticle(ParticleId),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownParticle(id) => write!(f, "No particle with id {}", id.index()),
        }
    }
}

impl std::error::Error for EditError {}

/// A color string that is not `#rrggbb` / `rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid color '{}', expected #rrggbb", self.0)
    }
}

impl std::error::Error for ColorParseError {}
