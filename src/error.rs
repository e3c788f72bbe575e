use thiserror::Error;

/// Failures raised by the record model and the view pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// A record violated one of the model invariants.
    #[error("malformed record \"{name}\": {reason}")]
    MalformedRecord { name: String, reason: String },
    /// A ranking asked for more entries than the collection holds.
    #[error("cannot rank top {requested} games: only {available} available")]
    NotEnoughRecords { requested: usize, available: usize },
    /// An aggregate exceeded the range of its numeric type.
    #[error("{0} overflowed")]
    AggregateOverflow(&'static str),
    /// An event name with no handler in the trigger table.
    #[error("unknown trigger \"{0}\"")]
    UnknownTrigger(String),
}

impl ViewError {
    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        ViewError::MalformedRecord {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
