/*
 * Provides the public entry point for the import parser, which recovers the
 * child controls of a hand-written Win32 window-construction routine so a
 * layout editor can load it as an editable model.
 *
 * The parser never executes or compiles the scanned code. It finds
 * `CreateWindowEx*` / `CreateWindow*` calls, reads their class, caption,
 * style, geometry and id arguments, and returns one `ControlRecord` per call
 * it could make sense of. Everything here is plain text processing, so the
 * crate builds and tests on every platform.
 */
pub mod error;
pub mod import_parser;
pub(crate) mod scanner;
pub mod types;
pub mod window_common;

pub use error::{ImportError, Result as ImportResult};
pub use import_parser::{ImportDiagnostic, ImportParser, ImportReport, parse_controls_from_code};
pub use scanner::LiteralEncoding;
pub use scanner::id_scanner::{ControlIdForm, scan_control_id};
pub use scanner::literal_lexer::{LexedLiteral, lex_string_literal};
pub use types::{CallForm, ControlBounds, ControlRecord, DEFAULT_LITERAL_LOOKAHEAD, ImportOptions};
pub use window_common::{ControlKind, classify_class_name, refine_button_kind, resolve_class_macro};
