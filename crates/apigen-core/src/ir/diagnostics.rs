use std::fmt;

/// A place where the resource tree stopped growing. The subtree below the
/// offending segment is missing from the generated client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeWarning {
    /// The segment has no literal prefix or single placeholder to derive a key from.
    UnmappableSegment { relative_uri: String, segment: String },
    /// Two different segments derive the same key under one parent.
    KeyCollision {
        key: String,
        existing_segment: String,
        segment: String,
    },
}

impl fmt::Display for TreeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeWarning::UnmappableSegment {
                relative_uri,
                segment,
            } => write!(
                f,
                "cannot derive a key for segment `{segment}` of `{relative_uri}`; subtree skipped"
            ),
            TreeWarning::KeyCollision {
                key,
                existing_segment,
                segment,
            } => write!(
                f,
                "segment `{segment}` collides with `{existing_segment}` on key `{key}`; \
                 subtree skipped"
            ),
        }
    }
}
