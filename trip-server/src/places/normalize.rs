//! Accent- and case-insensitive name folding.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a place name for matching.
///
/// Lowercases, then decomposes to NFD and drops combining marks (so "ā"
/// becomes "a"). Runs of whitespace collapse to a single space.
///
/// # Examples
///
/// ```
/// use trip_server::places::fold_name;
///
/// assert_eq!(fold_name("Whakatāne"), "whakatane");
/// assert_eq!(fold_name("  Lake   Tekapo "), "lake tekapo");
/// ```
pub fn fold_name(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip characters that are syntax in PostgREST filter expressions.
///
/// `*` is the wildcard and `,` `(` `)` `"` delimit `or=(...)` groups.
pub fn sanitize_pattern(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '*' | ',' | '(' | ')' | '"' | '%' | '\\'))
        .collect()
}
