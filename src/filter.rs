//! Filter functions.
//!
//! Filters transform text and never fail. Input that has nothing worth
//! keeping comes back empty (or `0` for [`int`]).

use crate::config::Backend;
use crate::numeric;

/// Keeps only alphabetic characters.
///
/// # Examples
///
/// ```
/// use input_cage::filter;
///
/// assert_eq!(filter::alpha("Bob<script>42"), "Bobscript");
/// ```
pub fn alpha(value: &str) -> String {
    value.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Keeps only alphanumeric characters.
pub fn alnum(value: &str) -> String {
    value.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Keeps only ASCII decimal digits.
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Integer value of the leading numeric prefix.
///
/// Trailing garbage is ignored, no prefix yields 0 and out-of-range values
/// saturate.
///
/// # Examples
///
/// ```
/// use input_cage::filter;
///
/// assert_eq!(filter::int("145abc"), 145);
/// assert_eq!(filter::int("A145"), 0);
/// ```
pub fn int(value: &str) -> i64 {
    numeric::leading_int(value)
}

/// Parent directory of a `/`-separated path.
///
/// # Examples
///
/// ```
/// use input_cage::filter;
///
/// assert_eq!(filter::dir("/usr/local/lib/"), "/usr/local");
/// assert_eq!(filter::dir("file.txt"), ".");
/// assert_eq!(filter::dir("/etc"), "/");
/// ```
pub fn dir(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        None => ".".to_string(),
        Some(i) => match trimmed[..i].trim_end_matches('/') {
            "" => "/".to_string(),
            parent => parent.to_string(),
        },
    }
}

/// Final component of a `/`-separated path.
pub fn base_name(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(i) => trimmed[i + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Rotates ASCII letters by 13 places. Applying it twice is the identity.
pub fn rot13(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a'),
            'A'..='Z' => rotate(c, b'A'),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8) -> char {
    char::from((c as u8 - base + 13) % 26 + base)
}

/// Removes markup tags.
///
/// A `<` followed by whitespace is kept as text. Quoted `>` inside a tag
/// does not close it, nested `<` deepens it, `<!-- -->` comments vanish and
/// an unterminated tag swallows the rest of the input.
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if after.starts_with(|c: char| c.is_ascii_whitespace()) {
            out.push('<');
            rest = after;
        } else if let Some(comment) = after.strip_prefix("!--") {
            rest = comment
                .find("-->")
                .map_or("", |end| &comment[end + 3..]);
        } else {
            rest = skip_tag(after);
        }
    }

    out.push_str(rest);
    out
}

/// Returns what follows the `>` that closes the tag opened just before `s`.
fn skip_tag(s: &str) -> &str {
    let mut depth = 1usize;
    let mut quote = None;

    for (i, c) in s.char_indices() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return &s[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}

/// Removes markup tags.
///
/// The extended backend additionally encodes quotes as `&#39;` and `&#34;`.
/// [`no_tags_or_special`] does not build on this encoding, so its quotes are
/// encoded once as well.
pub fn no_tags(value: &str, backend: Backend) -> String {
    let stripped = strip_tags(value);
    match backend {
        Backend::Native => stripped,
        Backend::Extended => {
            let mut out = String::with_capacity(stripped.len());
            for c in stripped.chars() {
                match c {
                    '\'' => out.push_str("&#39;"),
                    '"' => out.push_str("&#34;"),
                    _ => out.push(c),
                }
            }
            out
        }
    }
}

/// Removes markup tags, then escapes HTML-significant and control characters.
///
/// # Examples
///
/// ```
/// use input_cage::{filter, Backend};
///
/// assert_eq!(
///     filter::no_tags_or_special("<b>Tom & \"Jerry\"</b>\n", Backend::Native),
///     "Tom &amp; &quot;Jerry&quot;&#10;"
/// );
/// assert_eq!(
///     filter::no_tags_or_special("a&b", Backend::Extended),
///     "a&#38;b"
/// );
/// ```
pub fn no_tags_or_special(value: &str, backend: Backend) -> String {
    let stripped = strip_tags(value);
    let mut out = String::with_capacity(stripped.len());

    for c in stripped.chars() {
        let entity = match (backend, c) {
            (Backend::Native, '&') => "&amp;",
            (Backend::Native, '"') => "&quot;",
            (Backend::Native, '\'') => "&#039;",
            (Backend::Native, '<') => "&lt;",
            (Backend::Native, '>') => "&gt;",
            (Backend::Extended, '&') => "&#38;",
            (Backend::Extended, '"') => "&#34;",
            (Backend::Extended, '\'') => "&#39;",
            (Backend::Extended, '<') => "&#60;",
            (Backend::Extended, '>') => "&#62;",
            (_, c) if u32::from(c) < 32 => {
                out.push_str(&format!("&#{};", u32::from(c)));
                continue;
            }
            (_, c) => {
                out.push(c);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}
