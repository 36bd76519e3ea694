/*
 * Byte-level scanning primitives shared by the literal lexer, the argument
 * splitter, the id sub-scanner and the invocation scanner.
 *
 * Every syntactic token the scanner cares about is ASCII, so the helpers walk
 * `&[u8]` and only ever stop on ASCII bytes; offsets they return are always
 * valid `str` char boundaries of the original text.
 */
pub(crate) mod argument_splitter;
pub(crate) mod id_scanner;
pub(crate) mod literal_lexer;

pub(crate) fn is_ident_start(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic()
}

pub(crate) fn is_ident_continue(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

/// Returns the offset just past the identifier starting at `pos`, if one starts there.
pub(crate) fn identifier_end(bytes: &[u8], pos: usize) -> Option<usize> {
    if !bytes.get(pos).copied().is_some_and(is_ident_start) {
        return None;
    }
    let mut end = pos + 1;
    while bytes.get(end).copied().is_some_and(is_ident_continue) {
        end += 1;
    }
    Some(end)
}

/// Consumes a preprocessing-number-like run (`0x1F`, `1'000`, `10UL`) starting at a digit.
pub(crate) fn number_end(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while let Some(&b) = bytes.get(end) {
        let is_separator = b == b'\''
            && bytes.get(end + 1).copied().is_some_and(|next| next.is_ascii_alphanumeric());
        if is_ident_continue(b) || b == b'.' || is_separator {
            end += 1;
        } else {
            break;
        }
    }
    end
}

/// Skips whitespace, line comments and block comments. An unterminated block comment runs to the end.
pub(crate) fn skip_trivia(bytes: &[u8], mut pos: usize) -> usize {
    loop {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        match (bytes.get(pos), bytes.get(pos + 1)) {
            (Some(b'/'), Some(b'/')) => pos = line_comment_end(bytes, pos),
            (Some(b'/'), Some(b'*')) => pos = block_comment_end(bytes, pos),
            _ => return pos,
        }
    }
}

fn line_comment_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |newline| pos + newline + 1)
}

fn block_comment_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos + 2..]
        .windows(2)
        .position(|pair| pair == b"*/")
        .map_or(bytes.len(), |close| pos + 2 + close + 2)
}

/// Returns the offset past a comment starting at `pos`, if one starts there.
pub(crate) fn comment_end(bytes: &[u8], pos: usize) -> Option<usize> {
    match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'/'), Some(b'/')) => Some(line_comment_end(bytes, pos)),
        (Some(b'/'), Some(b'*')) => Some(block_comment_end(bytes, pos)),
        _ => None,
    }
}

/// Encoding prefix in front of a quoted literal. All of them decode to the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralEncoding {
    Plain,
    Utf8,
    Utf16,
    Utf32,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralOpening {
    pub encoding: LiteralEncoding,
    pub raw: bool,
    /// Offset of the opening quote character.
    pub quote: usize,
    pub quote_char: u8,
}

const ENCODING_PREFIXES: &[(&[u8], LiteralEncoding)] = &[
    (b"u8", LiteralEncoding::Utf8),
    (b"u", LiteralEncoding::Utf16),
    (b"U", LiteralEncoding::Utf32),
    (b"L", LiteralEncoding::Wide),
];

/*
 * Recognizes the start of a string or character literal at `pos`: an optional
 * encoding prefix, an optional `R` raw marker, then the quote. Raw markers only
 * apply to string literals.
 */
pub(crate) fn literal_opening(bytes: &[u8], pos: usize) -> Option<LiteralOpening> {
    let (encoding, after_prefix) = ENCODING_PREFIXES
        .iter()
        .find(|(prefix, _)| bytes[pos.min(bytes.len())..].starts_with(prefix))
        .map_or((LiteralEncoding::Plain, pos), |(prefix, encoding)| {
            (*encoding, pos + prefix.len())
        });

    let candidates = [(after_prefix, false), (after_prefix + 1, true)];
    for (quote, raw) in candidates {
        if raw && bytes.get(after_prefix) != Some(&b'R') {
            continue;
        }
        match bytes.get(quote) {
            Some(&b'"') => {
                return Some(LiteralOpening {
                    encoding,
                    raw,
                    quote,
                    quote_char: b'"',
                });
            }
            Some(&b'\'') if !raw => {
                return Some(LiteralOpening {
                    encoding,
                    raw,
                    quote,
                    quote_char: b'\'',
                });
            }
            _ => {}
        }
    }
    None
}

/// Offset just past the closing quote of an ordinary quoted literal, or `None` when unterminated.
pub(crate) fn quoted_end(bytes: &[u8], quote: usize) -> Option<usize> {
    let quote_char = *bytes.get(quote)?;
    let mut pos = quote + 1;
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'\\' => pos += 2,
            b'\n' => return None,
            _ if b == quote_char => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// Delimiter and body range of a raw string whose opening quote is at `quote`.
pub(crate) struct RawBody {
    pub body_start: usize,
    pub body_end: usize,
    pub end: usize,
}

// Longest raw-string delimiter C++ allows.
const MAX_RAW_DELIMITER: usize = 16;

pub(crate) fn raw_string_body(bytes: &[u8], quote: usize) -> Option<RawBody> {
    let delimiter_start = quote + 1;
    let search_end = bytes.len().min(delimiter_start + MAX_RAW_DELIMITER + 1);
    let open = delimiter_start
        + bytes
            .get(delimiter_start..search_end)?
            .iter()
            .position(|&b| b == b'(')?;
    let delimiter = &bytes[delimiter_start..open];
    if delimiter
        .iter()
        .any(|&b| b.is_ascii_whitespace() || b == b'\\' || b == b')')
    {
        return None;
    }

    let mut closing = Vec::with_capacity(delimiter.len() + 2);
    closing.push(b')');
    closing.extend_from_slice(delimiter);
    closing.push(b'"');

    let body_start = open + 1;
    let close = bytes[body_start..]
        .windows(closing.len())
        .position(|window| window == closing.as_slice())?;
    Some(RawBody {
        body_start,
        body_end: body_start + close,
        end: body_start + close + closing.len(),
    })
}

/// Offset past the whole literal that opens at `opening`, or `None` when it never closes.
pub(crate) fn literal_end(bytes: &[u8], opening: &LiteralOpening) -> Option<usize> {
    if opening.raw {
        raw_string_body(bytes, opening.quote).map(|body| body.end)
    } else {
        quoted_end(bytes, opening.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_trivia_crosses_comments() {
        let text = b"  // note\n /* block */  x";
        assert_eq!(skip_trivia(text, 0), text.len() - 1);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let text = b"/* never closed";
        assert_eq!(skip_trivia(text, 0), text.len());
    }

    #[test]
    fn test_literal_opening_prefixes() {
        let wide = literal_opening(b"L\"x\"", 0).map(|o| (o.encoding, o.quote, o.raw));
        assert_eq!(wide, Some((LiteralEncoding::Wide, 1, false)));

        let utf8 = literal_opening(b"u8\"x\"", 0).map(|o| (o.encoding, o.quote));
        assert_eq!(utf8, Some((LiteralEncoding::Utf8, 2)));

        let raw = literal_opening(b"LR\"(x)\"", 0).map(|o| (o.encoding, o.quote, o.raw));
        assert_eq!(raw, Some((LiteralEncoding::Wide, 2, true)));

        let plain_char = literal_opening(b"'a'", 0).map(|o| o.quote_char);
        assert_eq!(plain_char, Some(b'\''));
    }

    #[test]
    fn test_identifiers_are_not_literal_openings() {
        assert!(literal_opening(b"Label", 0).is_none());
        assert!(literal_opening(b"u8text", 0).is_none());
        assert!(literal_opening(b"R(x)", 0).is_none());
    }

    #[test]
    fn test_quoted_end_honors_escapes() {
        let text = br#""a\"b" rest"#;
        assert_eq!(quoted_end(text, 0), Some(6));
        assert_eq!(quoted_end(b"\"open\n\"", 0), None);
    }

    #[test]
    fn test_raw_string_with_delimiter() {
        let text = br#"R"xy(a)"b)xy" tail"#;
        let body = raw_string_body(text, 1).map(|b| (b.body_start, b.body_end, b.end));
        assert_eq!(body, Some((5, 9, 13)));
    }

    #[test]
    fn test_raw_delimiter_search_stops_after_sixteen_bytes() {
        let longest = br#"R"abcdefghijklmnop(x)abcdefghijklmnop""#;
        assert!(raw_string_body(longest, 1).is_some());
        let too_long = br#"R"abcdefghijklmnopq(x)abcdefghijklmnopq""#;
        assert!(raw_string_body(too_long, 1).is_none());
    }

    #[test]
    fn test_number_end_keeps_separators_and_suffixes() {
        assert_eq!(number_end(b"1'000UL,", 0), 7);
        assert_eq!(number_end(b"0x1F)", 0), 4);
    }
}
