//! Markup stripping for user-supplied text.
//!
//! Input is treated as an HTML fragment and reduced to its text content:
//! tags, comments, doctypes, and processing instructions are dropped and
//! character references are decoded. Stripping repeats until the text stops
//! changing, so decoded references can never smuggle a tag back in and
//! `sanitize(sanitize(x)) == sanitize(x)` holds for every input.

use memchr::memchr2;

/// Longest character reference we attempt to decode, `&` and `;` included.
const MAX_REFERENCE_LEN: usize = 12;

pub fn sanitize(raw: &str) -> String {
    let mut current = strip_pass(raw);
    loop {
        let next = strip_pass(&current);
        // Every change shortens the text, so this terminates.
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

enum Markup {
    Complete(usize),
    Unterminated,
}

fn strip_pass(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(offset) = memchr2(b'<', b'&', &bytes[pos..]) {
        let at = pos + offset;
        out.push_str(&input[pos..at]);
        let rest = &input[at..];

        if bytes[at] == b'<' {
            match markup_len(rest) {
                Some(Markup::Complete(len)) => pos = at + len,
                Some(Markup::Unterminated) => return out,
                None => {
                    out.push('<');
                    pos = at + 1;
                }
            }
        } else {
            match decode_reference(rest) {
                Some((ch, len)) => {
                    out.push(ch);
                    pos = at + len;
                }
                None => {
                    out.push('&');
                    pos = at + 1;
                }
            }
        }
    }

    out.push_str(&input[pos..]);
    out
}

/// Length of the markup construct at the start of `rest` (which begins with
/// `<`), or `None` when the `<` is plain text such as in `a < b`.
fn markup_len(rest: &str) -> Option<Markup> {
    if let Some(body) = rest.strip_prefix("<!--") {
        return Some(match body.find("-->") {
            Some(end) => Markup::Complete(4 + end + 3),
            None => Markup::Unterminated,
        });
    }

    let opener = rest[1..].chars().next()?;
    if !(opener.is_ascii_alphabetic() || matches!(opener, '/' | '!' | '?')) {
        return None;
    }

    let mut quote: Option<char> = None;
    for (idx, ch) in rest.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Some(Markup::Complete(idx + 1)),
            _ => {}
        }
    }
    Some(Markup::Unterminated)
}

/// Decode the character reference at the start of `rest` (which begins with
/// `&`). Returns the character and the number of bytes consumed.
fn decode_reference(rest: &str) -> Option<(char, usize)> {
    let end = rest
        .bytes()
        .take(MAX_REFERENCE_LEN)
        .position(|b| b == b';')?;
    let name = &rest[1..end];

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let digits = name.strip_prefix('#')?;
            let value = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            if value == 0 {
                return None;
            }
            char::from_u32(value)?
        }
    };

    Some((ch, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_text() {
        assert_eq!(sanitize("<b>hi</b> there"), "hi there");
        assert_eq!(
            sanitize(r#"<a href="x" title='a > b'>link</a>"#),
            "link"
        );
        assert_eq!(sanitize("<p>one</p><p>two</p>"), "onetwo");
        assert_eq!(sanitize("<img src=x onerror=alert(1)>"), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize("what is 2 < 3?"), "what is 2 < 3?");
        assert_eq!(sanitize("fish & chips"), "fish & chips");
        assert_eq!(sanitize("héllo wörld"), "héllo wörld");
        assert_eq!(sanitize("R&éàüöéàü;D"), "R&éàüöéàü;D");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn drops_comments_and_declarations() {
        assert_eq!(sanitize("a<!-- hidden -->b"), "ab");
        assert_eq!(sanitize("<!DOCTYPE html>text"), "text");
        assert_eq!(sanitize("<?xml version=\"1.0\"?>text"), "text");
    }

    #[test]
    fn unterminated_markup_swallows_the_rest() {
        assert_eq!(sanitize("keep <b class=\"x"), "keep ");
        assert_eq!(sanitize("keep <!-- never closed"), "keep ");
        assert_eq!(sanitize("<"), "<");
    }

    #[test]
    fn decodes_character_references() {
        assert_eq!(sanitize("fish &amp; chips"), "fish & chips");
        assert_eq!(sanitize("&#65;&#x42;"), "AB");
        assert_eq!(sanitize("&quot;q&quot; &apos;"), "\"q\" '");
        assert_eq!(sanitize("&bogus; &#0;"), "&bogus; &#0;");
    }

    #[test]
    fn encoded_markup_cannot_survive() {
        assert_eq!(sanitize("&lt;script&gt;alert(1)&lt;/script&gt;"), "alert(1)");
        assert_eq!(sanitize("<<b>b>x"), "x");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "<b>hi</b> there",
            "<<b>b>x",
            "&amp;lt;b&amp;gt;bold",
            "a < b > c",
            "&lt;",
            "<!-- <b> -->tail",
            "x &amp;amp; y",
            "plain",
            "<a title=\"<b>\">t</a>",
        ];

        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
        }
    }
}
