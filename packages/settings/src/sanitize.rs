// ABOUTME: Text sanitization for untrusted form values
// ABOUTME: Strips markup, collapses whitespace and removes percent-encoded octets

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*?>.*?</script>").expect("valid regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*?>.*?</style>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid regex")
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));

/// Characters removed from both ends of a sanitized value
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Sanitize a single-line text value from a form submission.
///
/// Tags are stripped, and script and style blocks go with their content. A
/// `>` inside a quoted attribute value does not close a tag. A `<` that
/// never closes into a tag is HTML-escaped together with the text up to the
/// next `<`. Whitespace runs collapse to one space and percent-encoded
/// octets are removed. Applying it twice gives the same result as applying
/// it once.
pub fn sanitize_text_field(input: &str) -> String {
    let mut filtered = input.to_string();

    if filtered.contains('<') {
        filtered = encode_lone_less_than(&filtered);
        filtered = SCRIPT_BLOCK.replace_all(&filtered, "").into_owned();
        filtered = STYLE_BLOCK.replace_all(&filtered, "").into_owned();
        filtered = TAG.replace_all(&filtered, "").into_owned();
        // Block removal can cut a tag open inside its quoted attribute
        filtered = filtered.replace('<', "&lt;");
    }

    filtered = WHITESPACE.replace_all(&filtered, " ").into_owned();
    filtered = filtered.trim_matches(TRIM_CHARS).to_string();

    let mut found = false;
    while let Some(octet) = PERCENT_OCTET.find(&filtered).map(|m| m.as_str().to_string()) {
        filtered = filtered.replace(&octet, "");
        found = true;
    }
    if found {
        filtered = SPACES
            .replace_all(&filtered, " ")
            .trim_matches(TRIM_CHARS)
            .to_string();
    }

    filtered
}

/// Escape a `<` that can never open a tag, together with the text up to
/// the next `<` or the end of input. A `<` opens a tag when a `>` outside
/// quoted attribute values comes before any other unquoted `<`.
fn encode_lone_less_than(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let segment = &rest[start..];

        match tag_end(segment) {
            TagEnd::Closed(i) => {
                out.push_str(&segment[..=i]);
                rest = &segment[i + 1..];
            }
            TagEnd::Lone(i) => {
                out.push_str(&escape_html(&segment[..i]));
                rest = &segment[i..];
            }
        }
    }

    out.push_str(rest);
    out
}

enum TagEnd {
    /// Byte offset of the `>` closing the tag
    Closed(usize),
    /// Byte offset where the escaped run stops
    Lone(usize),
}

/// Scan a segment starting at `<` for the end of the tag it opens
fn tag_end(segment: &str) -> TagEnd {
    let mut quote: Option<char> = None;

    for (i, c) in segment.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return TagEnd::Closed(i),
            (None, '<') => return TagEnd::Lone(i),
            (None, _) => {}
        }
    }

    TagEnd::Lone(segment.len())
}

/// Escape text for an HTML attribute or element body
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
