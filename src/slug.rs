//! String helpers for error-type URIs and tracker names.

/// Lowercase, URL-safe slug: runs of whitespace, `-`, `_` and `/` become a
/// single `-`, other punctuation is dropped.
///
/// ```
/// assert_eq!(reqstate::slugify("Generic bad request"), "generic-bad-request");
/// assert_eq!(reqstate::slugify("/fields-invalid"), "fields-invalid");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
            pending_dash = true;
        }
    }

    slug
}

/// Convert a hyphenated name to camelCase (`get-fields-invalid` ->
/// `getFieldsInvalid`).
pub fn hyphen_to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;

    for c in input.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Division by zero"), "division-by-zero");
        assert_eq!(slugify("  Not   found "), "not-found");
        assert_eq!(slugify("fields_conflict"), "fields-conflict");
        assert_eq!(slugify("Don't panic!"), "dont-panic");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("/"), "");
    }

    #[test]
    fn test_hyphen_to_camel_case() {
        assert_eq!(hyphen_to_camel_case("get-success-data"), "getSuccessData");
        assert_eq!(hyphen_to_camel_case("get"), "get");
        assert_eq!(hyphen_to_camel_case("-leading"), "leading");
        assert_eq!(hyphen_to_camel_case("get--double"), "getDouble");
    }
}
