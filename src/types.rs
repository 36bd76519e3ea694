/*
 * Platform-agnostic data types produced and consumed by the import parser:
 * the control records handed to the editor, the call spellings the scanner
 * recognizes, and the options that tune a scan.
 */
use crate::window_common::ControlKind;

/// Which spelling of the window-creation call produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallForm {
    CreateWindowExW,
    CreateWindowExA,
    CreateWindowEx,
    CreateWindowW,
    CreateWindowA,
    CreateWindow,
}

impl CallForm {
    const ALL: [CallForm; 6] = [
        CallForm::CreateWindowExW,
        CallForm::CreateWindowExA,
        CallForm::CreateWindowEx,
        CallForm::CreateWindowW,
        CallForm::CreateWindowA,
        CallForm::CreateWindow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CallForm::CreateWindowExW => "CreateWindowExW",
            CallForm::CreateWindowExA => "CreateWindowExA",
            CallForm::CreateWindowEx => "CreateWindowEx",
            CallForm::CreateWindowW => "CreateWindowW",
            CallForm::CreateWindowA => "CreateWindowA",
            CallForm::CreateWindow => "CreateWindow",
        }
    }

    pub fn from_name(name: &str) -> Option<CallForm> {
        Self::ALL.into_iter().find(|form| form.name() == name)
    }

    /// The `Ex` spellings take a leading extended-style argument.
    pub fn has_ex_style(self) -> bool {
        matches!(
            self,
            CallForm::CreateWindowExW | CallForm::CreateWindowExA | CallForm::CreateWindowEx
        )
    }

    pub fn is_wide(self) -> bool {
        matches!(self, CallForm::CreateWindowExW | CallForm::CreateWindowW)
    }

    /// Index of the class-name argument; every later argument is relative to it.
    pub(crate) fn first_argument_index(self) -> usize {
        if self.has_ex_style() { 1 } else { 0 }
    }
}

/// Position and size of a control, present only when all four were integer literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One recognized window-creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRecord {
    pub class_name: String,
    pub text: String,
    pub kind: ControlKind,
    pub id: Option<i64>,
    pub id_name: Option<String>,
    pub styles: Vec<String>,
    pub bounds: Option<ControlBounds>,
    pub call: CallForm,
    /// Byte offset of the call name in the scanned text.
    pub offset: usize,
}

impl ControlRecord {
    pub fn has_style(&self, style: &str) -> bool {
        self.styles.iter().any(|s| s == style)
    }
}

/*
 * Tunables for a scan. The defaults match what the editor uses when importing
 * a hand-written dialog routine.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Maximum number of bytes the literal lexer skips looking for an opening quote.
    pub literal_lookahead: usize,
    /// Turn `BUTTON` records with checkbox/radio/groupbox styles into their specific kinds.
    pub refine_button_styles: bool,
    /// Also match the `A`-suffixed and generic call spellings.
    pub accept_narrow_calls: bool,
}

pub const DEFAULT_LITERAL_LOOKAHEAD: usize = 64;

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            literal_lookahead: DEFAULT_LITERAL_LOOKAHEAD,
            refine_button_styles: true,
            accept_narrow_calls: true,
        }
    }
}

impl ImportOptions {
    pub fn with_literal_lookahead(mut self, lookahead: usize) -> Self {
        self.literal_lookahead = lookahead;
        self
    }

    pub fn with_refine_button_styles(mut self, refine: bool) -> Self {
        self.refine_button_styles = refine;
        self
    }

    pub fn with_accept_narrow_calls(mut self, accept: bool) -> Self {
        self.accept_narrow_calls = accept;
        self
    }

    pub(crate) fn accepts(&self, form: CallForm) -> bool {
        self.accept_narrow_calls || form.is_wide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_form_lookup_is_exact() {
        assert_eq!(
            CallForm::from_name("CreateWindowExW"),
            Some(CallForm::CreateWindowExW)
        );
        assert_eq!(CallForm::from_name("CreateWindow"), Some(CallForm::CreateWindow));
        assert_eq!(CallForm::from_name("createwindowexw"), None);
        assert_eq!(CallForm::from_name("CreateWindowExWrapper"), None);
    }

    #[test]
    fn test_ex_forms_shift_arguments_by_one() {
        assert_eq!(CallForm::CreateWindowExA.first_argument_index(), 1);
        assert_eq!(CallForm::CreateWindowW.first_argument_index(), 0);
    }

    #[test]
    fn test_options_builder_and_narrow_filter() {
        // Arrange
        let options = ImportOptions::default()
            .with_literal_lookahead(8)
            .with_accept_narrow_calls(false);
        // Assert
        assert_eq!(options.literal_lookahead, 8);
        assert!(options.refine_button_styles);
        assert!(options.accepts(CallForm::CreateWindowExW));
        assert!(options.accepts(CallForm::CreateWindowW));
        assert!(!options.accepts(CallForm::CreateWindowExA));
        assert!(!options.accepts(CallForm::CreateWindow));
    }
}
