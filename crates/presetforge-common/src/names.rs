//! Entry naming rules.
//!
//! Keys starting with `_` are comment/metadata entries. They live in the
//! preset table but are never listed, never reordered and never considered
//! when generating a fresh name.

use std::collections::HashSet;

/// Prefix marking a comment entry.
pub const COMMENT_PREFIX: char = '_';

/// Returns true for keys that are excluded from name listings.
///
/// The empty key is treated like a comment: it is kept in the file but
/// never shown as a preset.
#[must_use]
pub fn is_comment_key(key: &str) -> bool {
    key.is_empty() || key.starts_with(COMMENT_PREFIX)
}

/// Returns `base` if unused, else the first free `base_1`, `base_2`, ...
///
/// Comment keys in `existing` are ignored.
pub fn unique_name<'a, I>(existing: I, base: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().filter(|k| !is_comment_key(k)).collect();
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut counter = 1usize;
    loop {
        let candidate = format!("{base}_{counter}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}
