//! Font-family stripping.

use regex::Regex;

/// Removes `font-family: ...;` declarations by pattern.
///
/// This is a textual rewrite, not CSS parsing: a declaration runs up to the
/// next `;` on the same line, with character references such as `&quot;`
/// skipped as a unit so quoted family names in serialized attributes are
/// removed whole. A final declaration without a trailing `;` is left in
/// place.
///
/// The property name matches in any case and may be followed by whitespace
/// before the colon, so `FONT-FAMILY : x;` is removed too.
pub struct FontFamilyStripper {
    pattern: Regex,
}

impl FontFamilyStripper {
    /// Create a new stripper.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)font-family\s*:(?:&#?[0-9A-Za-z]+;|[^;\n])*?;")
                .expect("font-family pattern is valid"),
        }
    }

    /// Remove every `font-family` declaration from `html`.
    pub fn strip(&self, html: &str) -> String {
        self.pattern.replace_all(html, "").into_owned()
    }
}

impl Default for FontFamilyStripper {
    fn default() -> Self {
        Self::new()
    }
}
