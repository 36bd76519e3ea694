/*
 * Recognizes a string-literal expression at a cursor and decodes it.
 *
 * Handles the spellings found in hand-written window code: an optional
 * encoding prefix (`L`, `u8`, `u`, `U`), raw literals, one wrapping layer of
 * `TEXT(...)`/`_T(...)` or plain parentheses, and adjacent literals that the
 * compiler would concatenate. The decoded text never depends on the prefix.
 */
use super::{
    LiteralEncoding, LiteralOpening, identifier_end, is_ident_start, literal_opening, quoted_end,
    raw_string_body, skip_trivia,
};
use crate::error::{ImportError, Result as ImportResult};
use crate::types::DEFAULT_LITERAL_LOOKAHEAD;

use std::iter::Peekable;
use std::str::Chars;

const WRAPPER_MACROS: &[&str] = &["TEXT", "_T", "_TEXT", "__TEXT"];

/// A decoded string literal and the offset just past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLiteral {
    pub text: String,
    pub encoding: LiteralEncoding,
    pub end: usize,
}

/// Lexes the literal expression at `cursor` using the default lookahead.
pub fn lex_string_literal(text: &str, cursor: usize) -> ImportResult<LexedLiteral> {
    lex_string_literal_within(text, cursor, DEFAULT_LITERAL_LOOKAHEAD)
}

/*
 * Same as `lex_string_literal` with an explicit bound on how far past `cursor`
 * the opening quote may sit. On failure the error carries `cursor` itself, so
 * the caller can retry another interpretation from the same spot.
 */
pub(crate) fn lex_string_literal_within(
    text: &str,
    cursor: usize,
    lookahead: usize,
) -> ImportResult<LexedLiteral> {
    let bytes = text.as_bytes();
    let mut start = skip_trivia(bytes, cursor);
    if let Some(after_cast) = cast_prefix_end(bytes, start) {
        start = skip_trivia(bytes, after_cast);
    }
    if start.saturating_sub(cursor) > lookahead {
        return Err(not_a_literal(cursor));
    }

    match wrapper_inner_start(bytes, start) {
        Some(inner_start) => {
            let inner = lex_unwrapped(text, inner_start, cursor, lookahead)?;
            let close = skip_trivia(bytes, inner.end);
            if bytes.get(close) != Some(&b')') {
                return Err(not_a_literal(cursor));
            }
            Ok(LexedLiteral {
                end: close + 1,
                ..inner
            })
        }
        None => lex_unwrapped(text, start, cursor, lookahead),
    }
}

fn not_a_literal(cursor: usize) -> ImportError {
    ImportError::NotALiteral { offset: cursor }
}

/// Offset past a C-style pointer cast such as `(LPCWSTR)` or `(const wchar_t *)`.
fn cast_prefix_end(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    let mut cursor = skip_trivia(bytes, pos + 1);
    let mut saw_type_name = false;
    loop {
        match bytes.get(cursor) {
            Some(b')') if saw_type_name => return Some(cursor + 1),
            Some(b'*') => cursor += 1,
            Some(&b) if is_ident_start(b) => {
                if literal_opening(bytes, cursor).is_some() {
                    return None;
                }
                cursor = identifier_end(bytes, cursor)?;
                saw_type_name = true;
            }
            _ => return None,
        }
        cursor = skip_trivia(bytes, cursor);
    }
}

/// Offset just inside `TEXT(`, `_T(` or a bare `(`, if the cursor sits on one.
fn wrapper_inner_start(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) == Some(&b'(') {
        return Some(pos + 1);
    }
    let end = identifier_end(bytes, pos)?;
    let name = &bytes[pos..end];
    if !WRAPPER_MACROS.iter().any(|wrapper| wrapper.as_bytes() == name) {
        return None;
    }
    let open = skip_trivia(bytes, end);
    (bytes.get(open) == Some(&b'(')).then_some(open + 1)
}

fn string_opening(bytes: &[u8], pos: usize) -> Option<LiteralOpening> {
    literal_opening(bytes, pos).filter(|opening| opening.quote_char == b'"')
}

fn lex_unwrapped(
    text: &str,
    pos: usize,
    cursor: usize,
    lookahead: usize,
) -> ImportResult<LexedLiteral> {
    let bytes = text.as_bytes();
    let start = skip_trivia(bytes, pos);
    let opening = string_opening(bytes, start).ok_or_else(|| not_a_literal(cursor))?;
    if opening.quote - cursor > lookahead {
        return Err(not_a_literal(cursor));
    }
    let (mut decoded, mut end) =
        decode_literal(text, &opening).ok_or_else(|| not_a_literal(cursor))?;

    // Adjacent literals are one literal after translation.
    loop {
        let next = skip_trivia(bytes, end);
        let Some(following) = string_opening(bytes, next) else {
            break;
        };
        let Some((more, more_end)) = decode_literal(text, &following) else {
            break;
        };
        decoded.push_str(&more);
        end = more_end;
    }

    Ok(LexedLiteral {
        text: decoded,
        encoding: opening.encoding,
        end,
    })
}

fn decode_literal(text: &str, opening: &LiteralOpening) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if opening.raw {
        let body = raw_string_body(bytes, opening.quote)?;
        return Some((text[body.body_start..body.body_end].to_string(), body.end));
    }
    let end = quoted_end(bytes, opening.quote)?;
    Some((unescape(&text[opening.quote + 1..end - 1]), end))
}

/// Applies C escape rules to a literal body. Out-of-range code points become U+FFFD.
pub(crate) fn unescape(body: &str) -> String {
    if !body.contains('\\') {
        return body.to_string();
    }

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            result.push('\\');
            break;
        };
        match escape {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'a' => result.push('\u{07}'),
            'b' => result.push('\u{08}'),
            'f' => result.push('\u{0C}'),
            'v' => result.push('\u{0B}'),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                value = take_digits(&mut chars, 8, 2, value).1;
                result.push(code_point(value));
            }
            'x' => match take_digits(&mut chars, 16, usize::MAX, 0) {
                (0, _) => result.push('x'),
                (_, value) => result.push(code_point(value)),
            },
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                match take_digits(&mut chars, 16, width, 0) {
                    (0, _) => result.push(escape),
                    (_, value) => result.push(code_point(value)),
                }
            }
            // `\\`, `\"`, `\'`, `\?` and unknown escapes keep the escaped character.
            other => result.push(other),
        }
    }
    result
}

/// Consumes up to `max` digits of `radix`, returning how many were read and the accumulated value.
fn take_digits(
    chars: &mut Peekable<Chars<'_>>,
    radix: u32,
    max: usize,
    seed: u32,
) -> (usize, u32) {
    let mut value = seed;
    let mut count = 0;
    while count < max {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(radix)) else {
            break;
        };
        chars.next();
        value = value.saturating_mul(radix).saturating_add(digit);
        count += 1;
    }
    (count, value)
}

fn code_point(value: u32) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}
