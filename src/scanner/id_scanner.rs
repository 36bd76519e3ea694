/*
 * Classifies the control-id (`hMenu`) argument of a window-creation call.
 *
 * The argument is tokenized, at most one cast layer is peeled off (either a
 * C-style `(HMENU)` prefix or a `reinterpret_cast<HMENU>(...)`/`static_cast`
 * wrapper), and whatever is left must be a single integer literal or a single
 * identifier. Anything else is reported as an unrecognized form instead of
 * being guessed at.
 */
use super::{identifier_end, is_ident_continue, number_end, skip_trivia};
use crate::error::{ImportError, Result as ImportResult};

const NAMED_CASTS: &[&str] = &["reinterpret_cast", "static_cast"];
const NULL_IDS: &[&str] = &["nullptr", "NULL"];

/// What the id argument turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlIdForm {
    Numeric(i64),
    Symbolic(String),
    /// `nullptr` or `NULL`: the call passes no identifier at all.
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdToken<'a> {
    Ident(&'a str),
    Number(&'a str),
    Punct(u8),
}

/// Classifies one argument's text.
pub fn scan_control_id(argument: &str) -> ImportResult<ControlIdForm> {
    let unrecognized = || ImportError::UnrecognizedIdForm {
        text: argument.trim().to_string(),
    };

    let tokens = tokenize(argument).ok_or_else(unrecognized)?;
    let inner = strip_cast(&tokens).unwrap_or(&tokens);
    let operand = strip_grouping(inner);

    match operand {
        [IdToken::Number(digits)] => parse_integer_literal(digits)
            .map(ControlIdForm::Numeric)
            .ok_or_else(unrecognized),
        [IdToken::Punct(b'-'), IdToken::Number(digits)] => parse_integer_literal(digits)
            .and_then(i64::checked_neg)
            .map(ControlIdForm::Numeric)
            .ok_or_else(unrecognized),
        [IdToken::Ident(name)] if NULL_IDS.contains(name) => Ok(ControlIdForm::Absent),
        [IdToken::Ident(name)] => Ok(ControlIdForm::Symbolic((*name).to_string())),
        _ => Err(unrecognized()),
    }
}

/// Reads an integer literal argument (geometry, plain ids) when the argument is nothing more than that.
pub(crate) fn scan_integer(argument: &str) -> Option<i64> {
    match scan_control_id(argument) {
        Ok(ControlIdForm::Numeric(value)) => Some(value),
        _ => None,
    }
}

/*
 * Splits the argument into identifiers (with `::` qualification folded in),
 * number runs and single punctuation bytes. Literals make the argument
 * unrecognizable, so they end tokenization.
 */
fn tokenize(argument: &str) -> Option<Vec<IdToken<'_>>> {
    let bytes = argument.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = skip_trivia(bytes, 0);

    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'"' || b == b'\'' {
            return None;
        }
        if b.is_ascii_digit() {
            let end = number_end(bytes, pos);
            tokens.push(IdToken::Number(&argument[pos..end]));
            pos = end;
        } else if identifier_end(bytes, pos).is_some() || bytes[pos..].starts_with(b"::") {
            let end = qualified_identifier_end(bytes, pos);
            tokens.push(IdToken::Ident(&argument[pos..end]));
            pos = end;
        } else if b.is_ascii() {
            tokens.push(IdToken::Punct(b));
            pos += 1;
        } else {
            return None;
        }
        pos = skip_trivia(bytes, pos);
    }
    Some(tokens)
}

fn qualified_identifier_end(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    loop {
        if bytes[end..].starts_with(b"::") {
            end += 2;
        }
        match identifier_end(bytes, end) {
            Some(ident_end) => end = ident_end,
            None => return end,
        }
        if !bytes[end..].starts_with(b"::")
            || !bytes.get(end + 2).copied().is_some_and(is_ident_continue)
        {
            return end;
        }
    }
}

/// Peels exactly one cast layer, returning the tokens it wraps.
fn strip_cast<'t, 'a>(tokens: &'t [IdToken<'a>]) -> Option<&'t [IdToken<'a>]> {
    strip_named_cast(tokens).or_else(|| strip_c_style_cast(tokens))
}

// `reinterpret_cast<HMENU>( inner )`
fn strip_named_cast<'t, 'a>(tokens: &'t [IdToken<'a>]) -> Option<&'t [IdToken<'a>]> {
    let [IdToken::Ident(cast), IdToken::Punct(b'<'), rest @ ..] = tokens else {
        return None;
    };
    if !NAMED_CASTS.contains(cast) {
        return None;
    }
    let close_angle = rest.iter().position(|t| *t == IdToken::Punct(b'>'))?;
    if !is_type_name(&rest[..close_angle]) {
        return None;
    }
    match &rest[close_angle + 1..] {
        [IdToken::Punct(b'('), inner @ .., IdToken::Punct(b')')] if !inner.is_empty() => {
            Some(inner)
        }
        _ => None,
    }
}

/*
 * `(HMENU) inner`. A `-` right after the parentheses reads as subtraction
 * (`(IDC_BASE) - 1`) as readily as a cast of a negative number, so it is not
 * taken as a cast; `(HMENU)(-1)` still is.
 */
fn strip_c_style_cast<'t, 'a>(tokens: &'t [IdToken<'a>]) -> Option<&'t [IdToken<'a>]> {
    let [IdToken::Punct(b'('), rest @ ..] = tokens else {
        return None;
    };
    let close = rest.iter().position(|t| *t == IdToken::Punct(b')'))?;
    let inner = &rest[close + 1..];
    if inner.is_empty() || !is_type_name(&rest[..close]) {
        return None;
    }
    if inner.first() == Some(&IdToken::Punct(b'-')) {
        return None;
    }
    Some(inner)
}

/// A cast target: one or more identifiers optionally followed by `*`s.
fn is_type_name(tokens: &[IdToken<'_>]) -> bool {
    let names = tokens
        .iter()
        .take_while(|t| matches!(t, IdToken::Ident(_)))
        .count();
    names > 0
        && tokens[names..]
            .iter()
            .all(|t| *t == IdToken::Punct(b'*'))
}

/// Drops one pair of redundant parentheses around the operand.
fn strip_grouping<'t, 'a>(tokens: &'t [IdToken<'a>]) -> &'t [IdToken<'a>] {
    match tokens {
        [IdToken::Punct(b'('), inner @ .., IdToken::Punct(b')')] => inner,
        _ => tokens,
    }
}

/*
 * Parses decimal, `0x` hex, `0b` binary and leading-zero octal literals with
 * optional `u`/`l` suffixes and `'` digit separators. Returns `None` for
 * anything that starts with a digit but is not a valid integer literal.
 */
pub(crate) fn parse_integer_literal(literal: &str) -> Option<i64> {
    let cleaned: String = literal.chars().filter(|&c| c != '\'').collect();
    let digits = cleaned.trim_end_matches(['u', 'U', 'l', 'L']);
    let suffix = &cleaned[digits.len()..];
    if !is_valid_suffix(suffix) {
        return None;
    }

    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(binary) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, binary)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i64::from_str_radix(body, radix).ok()
}

fn is_valid_suffix(suffix: &str) -> bool {
    let lower = suffix.to_ascii_lowercase();
    matches!(
        lower.as_str(),
        "" | "u" | "l" | "ul" | "lu" | "ll" | "ull" | "llu"
    ) && !suffix.contains("lL")
        && !suffix.contains("Ll")
}
