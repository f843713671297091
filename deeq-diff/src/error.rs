use deeq_diff_core::Side;

/// Errors that abort a comparison.
///
/// None of these are retried: a comparison is a pure function of its inputs
/// and rules, so the same call would fail the same way again.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffError {
    /// One of the inputs was absent.
    InvalidValue {
        /// Which input was absent. [`Side::Both`] when neither was given.
        side: Side,
    },

    /// The walk went deeper than the configured limit.
    MaxDepthExceeded {
        /// The limit that was hit.
        max_depth: usize,
    },

    /// The sequence aligner found no finite-cost alignment.
    AlignmentFailed {
        /// Cost read off the far corner of the table.
        cost: f64,
    },

    /// A value has no structure to compare and its identity differs.
    UnsupportedKind {
        /// Display name of the offending type.
        type_name: String,
    },

    /// Something that cannot happen did.
    InternalInvariant {
        /// What went wrong.
        message: String,
    },
}

impl DiffError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        DiffError::InternalInvariant {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for DiffError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DiffError::InvalidValue { side } => match side {
                Side::Left => write!(f, "invalid value: the expected value is absent"),
                Side::Right => write!(f, "invalid value: the actual value is absent"),
                Side::Both => write!(f, "invalid value: both values are absent"),
            },
            DiffError::MaxDepthExceeded { max_depth } => {
                write!(f, "maximum depth exceeded: went deeper than {max_depth} levels")
            }
            DiffError::AlignmentFailed { cost } => {
                write!(f, "failed to compute diff: alignment cost {cost} is out of range")
            }
            DiffError::UnsupportedKind { type_name } => {
                write!(f, "cannot compare values of opaque type {type_name}")
            }
            DiffError::InternalInvariant { message } => {
                write!(f, "internal invariant violated: {message}")
            }
        }
    }
}

impl core::error::Error for DiffError {}

/// Result type of every engine entry point.
pub type Result<T, E = DiffError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            DiffError::MaxDepthExceeded { max_depth: 500 }.to_string(),
            "maximum depth exceeded: went deeper than 500 levels"
        );
        assert_eq!(
            DiffError::InvalidValue { side: Side::Right }.to_string(),
            "invalid value: the actual value is absent"
        );
        assert!(
            DiffError::UnsupportedKind {
                type_name: "Socket".into()
            }
            .to_string()
            .contains("Socket")
        );
    }
}
