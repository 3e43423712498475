// /src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// A type alias for `Result<T, anyhow::Error>` to be used throughout the application.
pub type AppResult<T> = anyhow::Result<T>;

/// Reasons a requested destination directory cannot host a new environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDestination {
    #[error(
        "destination '{value}' must not contain the path separator ({separator}) as this would break the activation scripts"
    )]
    SeparatorPresent { value: String, separator: char },

    #[error("the destination '{value}' already exists and is a file")]
    TargetIsFile { value: String },

    #[error("the destination '{suffix}' is not write-able at '{}'", ancestor.display())]
    NotWritable { ancestor: PathBuf, suffix: String },

    /// The working directory needed to absolutize a relative value is gone.
    #[error("the destination '{value}' cannot be made absolute: {reason}")]
    Unresolvable { value: String, reason: String },
}

/// Errors raised while turning the command line into an `Options` record.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// Unknown flags, missing positionals and conflicting flag pairs.
    #[error("{}", .0.render().to_string().trim_end())]
    Usage(#[from] clap::Error),

    #[error("argument dest_dir: {0}")]
    Destination(#[from] InvalidDestination),
}
