/*
 * Splits a call's argument list into top-level argument spans.
 *
 * Commas only separate arguments at nesting depth zero, so casts such as
 * `reinterpret_cast<HMENU>(IDC_OK)` or `MAKEINTRESOURCE(a, b)` stay within one
 * argument. String and character literals and comments are skipped whole so
 * their punctuation never affects the depth.
 */
use super::{
    LiteralOpening, comment_end, identifier_end, literal_end, literal_opening, number_end,
};
use crate::error::ImportError;

/// Byte range of one argument, trimmed of surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArgSpan {
    pub start: usize,
    pub end: usize,
}

impl ArgSpan {
    pub(crate) fn text(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArgumentList {
    pub args: Vec<ArgSpan>,
    /// Offset just past the closing parenthesis.
    pub end: usize,
}

/*
 * A failed split and the offset the walk reached. Everything before `resume`
 * belongs to the broken call, so the caller continues from there and never
 * walks the same text twice.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitFailure {
    pub error: ImportError,
    pub resume: usize,
}

impl ArgumentList {
    pub(crate) fn get(&self, index: usize) -> Option<ArgSpan> {
        self.args.get(index).copied()
    }
}

/// Splits the argument list whose opening parenthesis is at `open_paren`.
pub(crate) fn split_arguments(
    source: &str,
    open_paren: usize,
) -> Result<ArgumentList, SplitFailure> {
    let bytes = source.as_bytes();
    let fail = |offset: usize, resume: usize, reason: String| SplitFailure {
        error: ImportError::malformed(offset, reason),
        resume,
    };
    if bytes.get(open_paren) != Some(&b'(') {
        return Err(fail(
            open_paren,
            open_paren + 1,
            "argument list does not start with `(`".to_string(),
        ));
    }

    let mut closers: Vec<u8> = Vec::new();
    let mut args = Vec::new();
    let mut arg_start = open_paren + 1;
    let mut pos = open_paren + 1;

    while let Some(&b) = bytes.get(pos) {
        if let Some(end) = comment_end(bytes, pos) {
            pos = end;
            continue;
        }
        if let Some(opening) = literal_opening(bytes, pos) {
            pos = literal_end(bytes, &opening).ok_or_else(|| {
                fail(
                    opening.quote,
                    unterminated_literal_resume(bytes, &opening),
                    "unterminated literal in argument list".to_string(),
                )
            })?;
            continue;
        }
        if let Some(end) = identifier_end(bytes, pos) {
            pos = end;
            continue;
        }
        if b.is_ascii_digit() {
            pos = number_end(bytes, pos);
            continue;
        }

        match b {
            b'(' => closers.push(b')'),
            b'[' => closers.push(b']'),
            b'{' => closers.push(b'}'),
            b')' if closers.is_empty() => {
                push_arg(source, &mut args, arg_start, pos, true);
                return Ok(ArgumentList {
                    args,
                    end: pos + 1,
                });
            }
            b')' | b']' | b'}' => {
                if closers.pop() != Some(b) {
                    return Err(fail(
                        pos,
                        pos + 1,
                        format!("mismatched `{}` in argument list", b as char),
                    ));
                }
            }
            b',' if closers.is_empty() => {
                push_arg(source, &mut args, arg_start, pos, false);
                arg_start = pos + 1;
            }
            _ => {}
        }
        pos += 1;
    }

    Err(fail(
        open_paren,
        bytes.len(),
        "argument list is not closed before end of input".to_string(),
    ))
}

/// A quoted literal only runs to its line's end; a raw literal that never closes swallows the rest.
fn unterminated_literal_resume(bytes: &[u8], opening: &LiteralOpening) -> usize {
    if opening.raw {
        bytes.len()
    } else {
        opening.quote + 1
    }
}

/// Pushes the trimmed span `[start, end)`. An empty final span of an empty list is not an argument.
fn push_arg(source: &str, args: &mut Vec<ArgSpan>, start: usize, end: usize, is_last: bool) {
    let raw = &source[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let trimmed_len = raw.trim().len();
    if is_last && args.is_empty() && trimmed_len == 0 {
        return;
    }
    args.push(ArgSpan {
        start: start + leading,
        end: start + leading + trimmed_len,
    });
}
