use thiserror::Error;

/// Reasons an item cannot be turned into records.
///
/// Every variant is item-level: the caller skips the item and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("missing dates object")]
    MissingDates,
    #[error("missing date_type")]
    MissingDateType,
    #[error("no begin and no expression")]
    NoBeginNoExpression,
    #[error("no begin and not undated")]
    NoBeginNotUndated,
    #[error("no non-digital instance to derive a resource type from")]
    NoPhysicalInstance,
    #[error("unknown instance type '{0}'")]
    UnknownResourceType(String),
    #[error("unknown genre '{0}'")]
    UnknownGenre(String),
    #[error("unrecognized file extension on '{0}'")]
    UnknownFileType(String),
    #[error("no technical metadata for '{0}'")]
    MissingTechMetadata(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;
