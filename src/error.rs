use core::fmt;

/// Result alias for `lodgroup`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by clustering, search and hierarchy primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Point dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Two parallel inputs disagree in length.
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of attribute values.
        attributes: usize,
    },

    /// Invalid number of groups requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A search or level constraint cannot be satisfied by construction.
    InvalidConstraint {
        /// Constraint name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// The clustering backend produced a different number of groups than requested.
    ///
    /// Recoverable: the constrained search treats the candidate as invalid.
    ClusteringInconsistency {
        /// Requested group count.
        requested: usize,
        /// Group count actually produced.
        produced: usize,
    },

    /// Convex hull computation failed on degenerate (collinear/coplanar) input.
    ///
    /// Only raised by [`crate::geometry::ConvexHull`]; the furthest distance
    /// estimator recovers from it locally.
    DegenerateGeometry,

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A hierarchy level failed while clustering the members of one parent group.
    Level {
        /// Level index (0 = coarsest).
        level: usize,
        /// Parent group id at the previous level.
        parent: usize,
        /// Underlying error.
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the hierarchy level and parent group it came from.
    pub fn at_level(self, level: usize, parent: usize) -> Self {
        Error::Level {
            level,
            parent,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::LengthMismatch { points, attributes } => {
                write!(
                    f,
                    "length mismatch: {points} points but {attributes} attribute values"
                )
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} groups from {n_items} items")
            }
            Error::InvalidConstraint { name, message } => {
                write!(f, "invalid constraint '{name}': {message}")
            }
            Error::ClusteringInconsistency {
                requested,
                produced,
            } => {
                write!(
                    f,
                    "clustering backend produced {produced} groups, {requested} requested"
                )
            }
            Error::DegenerateGeometry => write!(f, "degenerate geometry for convex hull"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Level {
                level,
                parent,
                source,
            } => {
                write!(f, "level {level}, parent group {parent}: {source}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Level { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
