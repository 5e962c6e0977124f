//! ILIKE pattern matching for the in-memory fakes
//!
//! Mirrors the SQL operator the repository filters rely on: `%` matches any
//! sequence, `_` matches exactly one character, comparison is
//! case-insensitive. No escape handling; the store passes caller patterns
//! through verbatim, so the fake does too.

/// Case-insensitive wildcard match with SQL `%`/`_` semantics.
pub fn ilike_matches(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let value: Vec<char> = value.to_lowercase().chars().collect();

    // Two-pointer wildcard match: on mismatch, backtrack to the most recent
    // `%` and let it swallow one more character.
    let mut pi = 0;
    let mut vi = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while vi < value.len() {
        if pi < pattern.len() && (pattern[pi] == '_' || pattern[pi] == value[vi]) {
            pi += 1;
            vi += 1;
        } else if pi < pattern.len() && pattern[pi] == '%' {
            star = Some(pi);
            mark = vi;
            pi += 1;
        } else if let Some(star_pos) = star {
            pi = star_pos + 1;
            mark += 1;
            vi = mark;
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '%' {
        pi += 1;
    }

    pi == pattern.len()
}
