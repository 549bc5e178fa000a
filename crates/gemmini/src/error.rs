//! Error taxonomy for the geometry core.
//!
//! Every failure is raised synchronously at the point of use. Degenerate but
//! well-formed requests (area of an open curve, parallel line intersection)
//! are not errors; they log a warning and return a default instead.

use thiserror::Error;

/// Errors raised by point validation, shape construction, transforms and hulls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A point with an unsupported number of coordinates (only 2D and 3D exist here).
    #[error("a point needs 2 or 3 coordinates, got {got}")]
    PointArity { got: usize },

    /// Two points or point sets of different dimension were combined.
    #[error("dimension mismatch: {left}D vs {right}D")]
    DimensionMismatch { left: usize, right: usize },

    /// A row of a point set does not have the dimension of the first row.
    #[error("ragged point set: row {row} has {got} coordinates, expected {expected}")]
    RaggedPointSet {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// An operation that needs at least one point received none.
    #[error("point set is empty")]
    EmptyPointSet,

    /// A linear map that is not 2x2.
    #[error("expected a 2x2 matrix, got {rows}x{cols}")]
    MatrixShape { rows: usize, cols: usize },

    /// Per-point radii and angles of different lengths.
    #[error("{radii} radii given for {angles} angles")]
    LengthMismatch { radii: usize, angles: usize },

    /// A shape formula produced NaN or infinite coordinates.
    #[error("{kind}: generated coordinates are not finite")]
    NonFinite { kind: &'static str },

    /// A ring refers to a vertex that does not exist.
    #[error("{kind}: ring index {index} out of range for {len} points")]
    RingIndex {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// A required argument was left out (e.g. `skew` without any angle).
    #[error("{op}: missing argument `{arg}`")]
    MissingArgument {
        op: &'static str,
        arg: &'static str,
    },

    /// A shape parameter outside its documented range.
    #[error("{kind}: `{param}` {reason}")]
    Constraint {
        kind: &'static str,
        param: &'static str,
        reason: String,
    },

    /// A distortion rate the radial model cannot evaluate.
    #[error("{method}: invalid rate {rate}")]
    InvalidRate { method: &'static str, rate: f64 },

    /// Alpha-shape erosion left too few edges to form a ring.
    #[error("concave hull collapsed to {edges} boundary edges")]
    HullCollapsed { edges: usize },

    /// The Delaunay triangulation rejected an input point.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

impl GeomError {
    /// Shorthand for [`GeomError::Constraint`].
    pub fn constraint(kind: &'static str, param: &'static str, reason: impl Into<String>) -> Self {
        GeomError::Constraint {
            kind,
            param,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GeomError>;
