//! Identifier normalization for loosely-formatted resource references.
//!
//! Users paste identifiers in several shapes: the canonical dashed form,
//! a raw 32-character hex string, a full browser link whose path ends in
//! the identifier, or a "Title-Words-<hex>" fragment that is not a valid
//! URL at all. All of them normalize to the canonical dashed lowercase
//! 8-4-4-4-12 form. Anything unrecognizable is returned trimmed and
//! verbatim, deferring error detection to the store.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

static CANONICAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static BARE_HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{32}$").unwrap());

/// Any 32-contiguous-hex-character substring
static HEX_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9a-fA-F]{32}").unwrap());

/// Normalize a resource reference to the canonical dashed lowercase form.
///
/// Never fails: if no recognizable pattern is found, the trimmed input is
/// returned unchanged. Idempotent for every recognizable input.
///
/// ```
/// use blockdown_props::normalize;
///
/// assert_eq!(
///     normalize("0123456789abcdef0123456789ABCDEF"),
///     "01234567-89ab-cdef-0123-456789abcdef"
/// );
/// assert_eq!(normalize("not an id"), "not an id");
/// ```
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();

    if CANONICAL_PATTERN.is_match(trimmed) {
        return trimmed.to_ascii_lowercase();
    }

    if BARE_HEX_PATTERN.is_match(trimmed) {
        return dashed(trimmed);
    }

    if let Ok(parsed) = Url::parse(trimmed) {
        // Query and fragment are ignored; only the path is searched.
        let path = parsed.path();

        if let Some(found) = HEX_RUN_PATTERN.find_iter(path).last() {
            return dashed(found.as_str());
        }

        // Trailing hyphen-delimited segment of the last path component,
        // e.g. /My-Page-Title-<hex>
        if let Some(segment) = path
            .rsplit('/')
            .next()
            .and_then(|component| component.rsplit('-').next())
            && BARE_HEX_PATTERN.is_match(segment)
        {
            return dashed(segment);
        }
    }

    // Not a URL: scan the raw string for an embedded identifier
    // (covers "Title-Words-<hex>" forms pasted without a scheme).
    if let Some(found) = HEX_RUN_PATTERN.find_iter(trimmed).last() {
        return dashed(found.as_str());
    }

    trimmed.to_string()
}

/// Dash a validated 32-hex string at offsets 8, 12, 16, 20 and lowercase it.
fn dashed(hex: &str) -> String {
    match Uuid::try_parse(hex) {
        Ok(id) => id.hyphenated().to_string(),
        // Unreachable for the 32-hex inputs this module feeds in, but
        // degrade rather than panic.
        Err(_) => hex.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHED: &str = "01234567-89ab-cdef-0123-456789abcdef";
    const BARE: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_canonical_form_lowercased() {
        assert_eq!(normalize(DASHED), DASHED);
        assert_eq!(normalize("01234567-89AB-CDEF-0123-456789ABCDEF"), DASHED);
    }

    #[test]
    fn test_bare_hex_gets_dashes() {
        assert_eq!(normalize(BARE), DASHED);
        assert_eq!(normalize(&BARE.to_uppercase()), DASHED);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize(&format!("  {BARE}\n")), DASHED);
    }

    #[test]
    fn test_browser_link() {
        let url = format!("https://store.example.com/workspace/My-Page-{BARE}");
        assert_eq!(normalize(&url), DASHED);
    }

    #[test]
    fn test_browser_link_query_ignored() {
        let url = format!("https://store.example.com/{BARE}?v=deadbeefdeadbeefdeadbeefdeadbeef");
        assert_eq!(normalize(&url), DASHED);
    }

    #[test]
    fn test_link_takes_last_hex_run_in_path() {
        let other = "ffffffffffffffffffffffffffffffff";
        let url = format!("https://store.example.com/{other}/sub-{BARE}");
        assert_eq!(normalize(&url), DASHED);
    }

    #[test]
    fn test_pasted_title_without_scheme() {
        assert_eq!(normalize(&format!("My-Page-Title-{BARE}")), DASHED);
    }

    #[test]
    fn test_unrecognizable_returned_verbatim() {
        assert_eq!(normalize("  hello world  "), "hello world");
        assert_eq!(normalize(""), "");
        // 31 hex chars is not an identifier
        assert_eq!(normalize(&BARE[..31]), &BARE[..31]);
    }

    #[test]
    fn test_idempotent() {
        for input in [
            DASHED.to_string(),
            BARE.to_string(),
            format!("https://store.example.com/x-{BARE}"),
            "garbage".to_string(),
        ] {
            let once = normalize(&input);
            assert_eq!(normalize(&once), once, "for input {input:?}");
        }
    }
}
