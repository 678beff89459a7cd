/// Result alias used across the crate.
/// Errors are `anyhow::Error` so call sites can attach context with `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
