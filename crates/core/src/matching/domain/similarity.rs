/// Edit-distance similarity ratio in [0, 1]; 1 means identical.
///
/// Symmetric in its arguments. Two empty strings are identical; an empty
/// string against a non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b).clamp(0.0, 1.0)
}
