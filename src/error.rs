use thiserror::Error;

/// Fatal conditions for a schema-inference run.
///
/// Inference is an all-or-nothing build artifact: any of these aborts the run
/// before output is written. Objects without a discriminator are *not* errors;
/// they classify as plain `object` leaves (see `value::Shape`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed corpus document `{origin}`: {detail}")]
    MalformedDocument { origin: String, detail: String },

    #[error("traversal depth exceeded {limit}; input is likely cyclic or pathological")]
    DepthExceeded { limit: usize },

    #[error(
        "shape conflict on `{kind}.{property}`: observed both array and non-array values \
         (pass --array-wins to widen to the array shape)"
    )]
    ShapeConflict { kind: String, property: String },
}

pub type Result<T> = std::result::Result<T, Error>;
