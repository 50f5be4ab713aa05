//! Naming of the substitution variable introduced by the chain rule.

/// The names a substitution variable can take, in rotation order.
pub const SUBSTITUTION_POOL: [&str; 4] = ["x", "z", "t", "g"];

/// Returns the name following `current` in [`SUBSTITUTION_POOL`]. Names outside the pool, and
/// the last name of the pool, wrap around to the first name.
///
/// The result never equals `current`, so a substitution variable cannot be confused with the
/// variable of differentiation.
pub fn next_name(current: &str) -> &'static str {
    SUBSTITUTION_POOL
        .iter()
        .position(|name| *name == current)
        .and_then(|index| SUBSTITUTION_POOL.get(index + 1))
        .copied()
        .unwrap_or(SUBSTITUTION_POOL[0])
}
