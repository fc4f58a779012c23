use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all gemorder operations.
#[derive(Debug, Error, Diagnostic)]
pub enum GemorderError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Package name is not a well-formed gem name.
    #[error("Invalid gem name '{name}'")]
    #[diagnostic(help("Gem names must be non-empty and must not contain path separators"))]
    InvalidName { name: String },

    /// A version requirement string could not be parsed.
    #[error("Invalid version requirement '{requirement}'")]
    #[diagnostic(help("Expected forms like '1.2.3', '>= 1.0', or '~> 2.1'"))]
    InvalidRequirement { requirement: String },

    /// No known version of the gem satisfies every supplied requirement.
    #[error("No version of gem '{gem}' satisfies the version requirements {requirements:?}")]
    Unsatisfiable {
        gem: String,
        requirements: Vec<String>,
    },

    /// Auto-install handles at most one version requirement per gem.
    #[error("Cannot auto-install gem '{gem}' with more than one version requirement: {requirements:?}")]
    UnsupportedConstraint {
        gem: String,
        requirements: Vec<String>,
    },

    /// Ordering stalled; the remainder holds a cycle or depends on gems
    /// missing from the graph, so no install order exists.
    #[error("Unhandled dependencies: {remainder}")]
    Cycle { remainder: String },

    /// Invalid or malformed configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.gemorder/config.toml for syntax errors"))]
    Config { message: String },

    /// An external command failed in a way we do not recover from.
    #[error("Command failed: {message}")]
    Command { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type GemorderResult<T> = miette::Result<T>;
