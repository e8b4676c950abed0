/// Alias to a scalar floating type.
///
/// NOTE: quality measures accumulate long sums over sample pairs, so `f64` is used to keep them
/// reproducible.
pub type Float = f64;
