use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A host orchestrator shelling out to the backend can tell a broken
/// invocation apart from a manifest that failed to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Recipe generated
    Success = 0,
    /// Manifest, package map, config or I/O error
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for recipe generation.
#[derive(Debug, Error)]
pub enum RosBackendError {
    #[error("package.xml not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse package.xml: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest follows the package.xml format (REP 127/140/149)")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Invalid manifest path: {path}\nReason: {reason}\n\n💡 Hint: Point to a ROS package directory or its package.xml")]
    InvalidManifestPath { path: PathBuf, reason: String },

    #[error("Package map not found: {path}\n\n💡 Hint: Check the paths listed under 'extra-package-mappings'")]
    PackageMapNotFound { path: PathBuf },

    #[error("Failed to parse package map: {path}\nDetails: {details}\n\n💡 Hint: A package map is a YAML mapping of `name: {{conda: [...]}}` or `name: {{ros: [...]}}` entries")]
    PackageMapParseError { path: PathBuf, details: String },

    #[error("Unknown ROS distribution: '{name}'\n\n💡 Hint: Known distributions are: {known}")]
    UnknownDistro { name: String, known: String },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
