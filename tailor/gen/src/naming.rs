//! Go identifier generation.
//!
//! Raw design names (`bottle_id`, `X-Request-Id`, `account`) are split into
//! words and rejoined in camel case. Common initialisms keep their casing
//! (`bottle_id` becomes `BottleID`), and unexported names that collide with
//! Go keywords get a trailing underscore.

use heck::ToSnakeCase;

/// Words rendered fully upper case.
const INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id", "ip",
    "json", "jwt", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp", "tls",
    "ttl", "udp", "ui", "uid", "uri", "url", "utf8", "uuid", "vm", "xml", "xsrf", "xss",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Converts a raw name into a Go identifier.
///
/// `exported` selects an upper case (exported) or lower case first letter.
///
/// ## Examples
///
/// ```
/// use tailor_gen::naming::exported_name;
///
/// assert_eq!(exported_name("bottle_id", true), "BottleID");
/// assert_eq!(exported_name("BottleMedia", false), "bottleMedia");
/// assert_eq!(exported_name("X-Request-Id", true), "XRequestID");
/// assert_eq!(exported_name("type", false), "type_");
/// ```
pub fn exported_name(raw: &str, exported: bool) -> String {
    let snake = raw.to_snake_case();
    let mut out = String::with_capacity(raw.len());
    for (i, word) in snake.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 && !exported {
            out.push_str(word);
        } else if INITIALISMS.contains(&word) {
            out.push_str(&word.to_uppercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }

    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if !exported && GO_KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_names_are_pascal_case() {
        assert_eq!(exported_name("name", true), "Name");
        assert_eq!(exported_name("vintage_year", true), "VintageYear");
        assert_eq!(exported_name("bottleMedia", true), "BottleMedia");
    }

    #[test]
    fn unexported_names_are_camel_case() {
        assert_eq!(exported_name("BottleMedia", false), "bottleMedia");
        assert_eq!(exported_name("account_href", false), "accountHref");
    }

    #[test]
    fn initialisms_are_upper_case() {
        assert_eq!(exported_name("id", true), "ID");
        assert_eq!(exported_name("href_url", true), "HrefURL");
        assert_eq!(exported_name("HTTPServer", true), "HTTPServer");
        // leading initialism of an unexported name stays lower case
        assert_eq!(exported_name("id", false), "id");
    }

    #[test]
    fn keywords_are_escaped_only_when_unexported() {
        assert_eq!(exported_name("range", false), "range_");
        assert_eq!(exported_name("range", true), "Range");
    }

    #[test]
    fn leading_digits_and_empty_names_are_made_valid() {
        assert!(exported_name("2fa", true).starts_with("_2"));
        assert_eq!(exported_name("", true), "_");
        assert_eq!(exported_name("---", false), "_");
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(exported_name("x-request-id", true), exported_name("x-request-id", true));
    }
}
