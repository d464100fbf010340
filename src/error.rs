use thiserror::Error;

/// Errors raised by the scoring and projection entry points.
///
/// All errors are raised synchronously at the call that detects them. Every
/// computation in this crate is a pure function of its inputs, so retrying a
/// failed call with the same inputs is pointless; callers should surface the
/// error and correct the input instead.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum AnalysisError {
    /// Non-finite coordinates, or records rejected at store build time.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Investment parameters outside their domain, or an unrecognized
    /// power class.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Annual profit is non-positive; payback period and break-even are
    /// undefined and the projection cannot be completed.
    #[error("degenerate projection: {0}")]
    DegenerateProjection(String),
}
