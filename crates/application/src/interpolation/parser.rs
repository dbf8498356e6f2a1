//! Placeholder parser for `${variable}` syntax
//!
//! Finds placeholder references and their byte positions in a string.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z0-9._-]+)\}").expect("placeholder pattern is valid")
});

/// A `${name}` reference found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The variable name (without `${` `}`).
    pub name: String,

    /// Byte range of the whole `${name}` text in the original string.
    pub span: Range<usize>,
}

/// Parses a string and returns every placeholder in order of appearance.
///
/// Names are restricted to `[a-zA-Z0-9._-]+`; anything else (`${}`,
/// `${a b}`, `{name}`) is plain text.
///
/// # Examples
///
/// ```
/// use sequent_application::interpolation::parse_placeholders;
///
/// let refs = parse_placeholders("users/${user.id}/posts/${post_id}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "user.id");
/// assert_eq!(refs[1].name, "post_id");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Placeholder {
                name: name.as_str().to_string(),
                span: whole.range(),
            })
        })
        .collect()
}
