/*
 * Scans source text for window-creation calls and turns each one into a
 * `ControlRecord`.
 *
 * The scan walks the text once, stepping over comments and literals, and
 * stops on identifiers that spell one of the `CreateWindow*` functions and
 * are followed by `(`. Each call's argument list is split by depth, then the
 * class, caption, style, geometry and id arguments are read positionally.
 * Failures stay local to their call: they become diagnostics, and the scan
 * continues after the call's closing parenthesis.
 */
use crate::error::{ImportError, Result as ImportResult};
use crate::scanner::argument_splitter::{ArgSpan, ArgumentList, split_arguments};
use crate::scanner::id_scanner::{ControlIdForm, scan_control_id, scan_integer};
use crate::scanner::literal_lexer::lex_string_literal_within;
use crate::scanner::{
    comment_end, identifier_end, literal_end, literal_opening, number_end, skip_trivia,
};
use crate::types::{CallForm, ControlBounds, ControlRecord, ImportOptions};
use crate::window_common::{classify_class_name, refine_button_kind, resolve_class_macro};

// Argument positions relative to the class-name argument.
const CLASS_ARG: usize = 0;
const TEXT_ARG: usize = 1;
const STYLE_ARG: usize = 2;
const GEOMETRY_ARGS: usize = 3;
const ID_ARG: usize = 8;

const NO_TEXT_SENTINELS: &[&str] = &["nullptr", "NULL", "0"];

/// A problem found while importing one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDiagnostic {
    /// Byte offset of the call name the problem belongs to.
    pub call_offset: usize,
    pub error: ImportError,
}

/// Records and diagnostics from one scan, both in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub controls: Vec<ControlRecord>,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ImportReport {
    /// Number of calls that were matched but left out of `controls`.
    pub fn dropped_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.error.drops_occurrence())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CallSite {
    form: CallForm,
    offset: usize,
    open_paren: usize,
}

/// Imports controls from window-construction code. Holds only its options and can be reused.
#[derive(Debug, Clone, Default)]
pub struct ImportParser {
    options: ImportOptions,
}

impl ImportParser {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn parse(&self, code: &str) -> ImportReport {
        let mut report = ImportReport::default();
        let mut pos = 0;

        while let Some(site) = self.find_next_call(code, pos) {
            let arguments = match split_arguments(code, site.open_paren) {
                Ok(arguments) => arguments,
                Err(failure) => {
                    log::warn!(
                        "ImportParser: Dropping {} at offset {}: {}",
                        site.form.name(),
                        site.offset,
                        failure.error
                    );
                    report.diagnostics.push(ImportDiagnostic {
                        call_offset: site.offset,
                        error: failure.error,
                    });
                    pos = failure.resume;
                    continue;
                }
            };
            pos = arguments.end;

            match self.build_record(code, site, &arguments, &mut report.diagnostics) {
                Ok(record) => {
                    log::debug!(
                        "ImportParser: {} at offset {} -> {:?} class '{}' id {:?}/{:?}",
                        site.form.name(),
                        site.offset,
                        record.kind,
                        record.class_name,
                        record.id,
                        record.id_name
                    );
                    report.controls.push(record);
                }
                Err(error) => {
                    log::warn!(
                        "ImportParser: Dropping {} at offset {}: {error}",
                        site.form.name(),
                        site.offset
                    );
                    report.diagnostics.push(ImportDiagnostic {
                        call_offset: site.offset,
                        error,
                    });
                }
            }
        }

        log::debug!(
            "ImportParser: Imported {} controls, dropped {}, {} diagnostics.",
            report.controls.len(),
            report.dropped_count(),
            report.diagnostics.len()
        );
        report
    }

    /*
     * Finds the next identifier at or after `pos` that names an accepted call
     * form and is followed by `(`. Comments, literals and number runs are
     * stepped over whole, so a call name inside any of them never matches.
     */
    fn find_next_call(&self, code: &str, mut pos: usize) -> Option<CallSite> {
        let bytes = code.as_bytes();
        while pos < bytes.len() {
            if let Some(end) = comment_end(bytes, pos) {
                pos = end;
                continue;
            }
            if let Some(opening) = literal_opening(bytes, pos) {
                // Unterminated: step past the quote, or stop at an open raw literal.
                pos = literal_end(bytes, &opening).unwrap_or(if opening.raw {
                    bytes.len()
                } else {
                    opening.quote + 1
                });
                continue;
            }
            if let Some(end) = identifier_end(bytes, pos) {
                let form = CallForm::from_name(&code[pos..end])
                    .filter(|form| self.options.accepts(*form));
                if let Some(form) = form {
                    let open_paren = skip_trivia(bytes, end);
                    if bytes.get(open_paren) == Some(&b'(') {
                        return Some(CallSite {
                            form,
                            offset: pos,
                            open_paren,
                        });
                    }
                }
                pos = end;
                continue;
            }
            if bytes[pos].is_ascii_digit() {
                pos = number_end(bytes, pos);
                continue;
            }
            pos += 1;
            // Stay on char boundaries when skipping non-ASCII text.
            while pos < bytes.len() && !code.is_char_boundary(pos) {
                pos += 1;
            }
        }
        None
    }

    fn build_record(
        &self,
        code: &str,
        site: CallSite,
        arguments: &ArgumentList,
        diagnostics: &mut Vec<ImportDiagnostic>,
    ) -> ImportResult<ControlRecord> {
        let base = site.form.first_argument_index();
        let argument = |index: usize| arguments.get(base + index);

        let class_name = self.read_class_name(code, site, argument(CLASS_ARG))?;
        let text = self.read_window_text(code, site, argument(TEXT_ARG))?;

        let styles = argument(STYLE_ARG)
            .map(|span| style_tokens(span.text(code)))
            .unwrap_or_default();
        let bounds = read_bounds(code, |i| argument(GEOMETRY_ARGS + i));

        let mut kind = classify_class_name(&class_name);
        if self.options.refine_button_styles {
            kind = refine_button_kind(kind, &styles);
        }

        let (id, id_name) = match argument(ID_ARG).map(|span| scan_control_id(span.text(code))) {
            Some(Ok(ControlIdForm::Numeric(value))) => (Some(value), None),
            Some(Ok(ControlIdForm::Symbolic(name))) => (None, Some(name)),
            Some(Ok(ControlIdForm::Absent)) => (None, None),
            Some(Err(error)) => {
                log::debug!(
                    "ImportParser: Keeping call at offset {} without an id: {error}",
                    site.offset
                );
                diagnostics.push(ImportDiagnostic {
                    call_offset: site.offset,
                    error,
                });
                (None, None)
            }
            None => {
                log::trace!(
                    "ImportParser: Call at offset {} has no id argument ({} arguments).",
                    site.offset,
                    arguments.args.len()
                );
                (None, None)
            }
        };

        Ok(ControlRecord {
            class_name,
            text,
            kind,
            id,
            id_name,
            styles,
            bounds,
            call: site.form,
            offset: site.offset,
        })
    }

    /// Class argument: a string literal, or a class-name macro such as `PROGRESS_CLASSW`.
    fn read_class_name(
        &self,
        code: &str,
        site: CallSite,
        span: Option<ArgSpan>,
    ) -> ImportResult<String> {
        let span =
            span.ok_or_else(|| ImportError::malformed(site.offset, "missing class argument"))?;
        if let Some(text) = self.read_whole_literal(code, span) {
            return Ok(text);
        }

        let candidate = span.text(code);
        if let Some(class_name) = resolve_class_macro(candidate) {
            log::trace!("ImportParser: Class macro {candidate} resolves to '{class_name}'.");
            return Ok(class_name.to_string());
        }
        Err(ImportError::malformed(
            site.offset,
            format!(
                "class argument `{candidate}` is neither a string literal nor a known class macro"
            ),
        ))
    }

    /// Caption argument: a string literal, or a null sentinel meaning "no text".
    fn read_window_text(
        &self,
        code: &str,
        site: CallSite,
        span: Option<ArgSpan>,
    ) -> ImportResult<String> {
        let span = span
            .ok_or_else(|| ImportError::malformed(site.offset, "missing window text argument"))?;
        if let Some(text) = self.read_whole_literal(code, span) {
            return Ok(text);
        }

        let candidate = span.text(code);
        if NO_TEXT_SENTINELS.contains(&candidate) {
            return Ok(String::new());
        }
        Err(ImportError::malformed(
            site.offset,
            format!("window text argument `{candidate}` is not a string literal"),
        ))
    }

    /// Decoded literal when it spans the whole argument, ignoring trailing comments.
    fn read_whole_literal(&self, code: &str, span: ArgSpan) -> Option<String> {
        match lex_string_literal_within(code, span.start, self.options.literal_lookahead) {
            Ok(literal) if skip_trivia(code.as_bytes(), literal.end) >= span.end => {
                Some(literal.text)
            }
            Ok(_) => {
                log::trace!(
                    "ImportParser: Literal at offset {} is followed by more expression text.",
                    span.start
                );
                None
            }
            Err(error) => {
                log::trace!("ImportParser: {error}");
                None
            }
        }
    }
}

/// Identifier tokens of a style expression, skipping names that are called like functions.
fn style_tokens(style: &str) -> Vec<String> {
    let bytes = style.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if let Some(end) = comment_end(bytes, pos) {
            pos = end;
            continue;
        }
        if bytes[pos].is_ascii_digit() {
            pos = number_end(bytes, pos);
            continue;
        }
        match identifier_end(bytes, pos) {
            Some(end) => {
                if bytes.get(skip_trivia(bytes, end)) != Some(&b'(') {
                    tokens.push(style[pos..end].to_string());
                }
                pos = end;
            }
            None => pos += 1,
        }
    }
    tokens
}

fn read_bounds(code: &str, argument: impl Fn(usize) -> Option<ArgSpan>) -> Option<ControlBounds> {
    let value = |index: usize| -> Option<i32> {
        let span = argument(index)?;
        i32::try_from(scan_integer(span.text(code))?).ok()
    };
    Some(ControlBounds {
        x: value(0)?,
        y: value(1)?,
        width: value(2)?,
        height: value(3)?,
    })
}

/// Scans `code` with default options and returns the recognized controls in source order.
pub fn parse_controls_from_code(code: &str) -> Vec<ControlRecord> {
    ImportParser::default().parse(code).controls
}
