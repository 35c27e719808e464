//! Error types.
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
/// Errors which abort fusing the rest of a document.
///
/// Elements fused before the error was raised keep their changes.
pub enum Error {
    /// A `transform` attribute couldn't be parsed
    Transform {
        /// The value of the attribute
        value: String,
        /// The reason parsing failed
        reason: String,
    },
    /// A `d` attribute couldn't be parsed
    PathData {
        /// The value of the attribute
        value: String,
        /// The reason parsing failed
        reason: String,
    },
    /// No element with a selected id exists in the document
    UnknownSelection(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transform { value, reason } => {
                f.write_fmt(format_args!("invalid transform `{value}`: {reason}"))
            }
            Self::PathData { value, reason } => {
                f.write_fmt(format_args!("invalid path data `{value}`: {reason}"))
            }
            Self::UnknownSelection(id) => {
                f.write_fmt(format_args!("no element with the selected id `{id}` was found"))
            }
        }
    }
}
impl std::error::Error for Error {}
