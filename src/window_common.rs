/*
 * Common window-class knowledge shared by the scanner: the `ControlKind`
 * classification, the table of system control class names, the class-name
 * macros from the Windows headers, and the button-style refinements.
 *
 * The tables are plain data so a new control class is one more row, never a
 * change to the scanner.
 */

/// Identifies the kind of a control so the editor can pick a property panel without Win32 class queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Label,
    Button,
    CheckBox,
    RadioButton,
    GroupBox,
    Edit,
    RichEdit,
    ComboBox,
    ListBox,
    ScrollBar,
    ProgressBar,
    TrackBar,
    UpDown,
    StatusBar,
    ListView,
    TreeView,
    TabControl,
    Link,
    DateTimePicker,
    MonthCalendar,
    Unknown,
}

// Registered system class names, in the spelling the Windows headers use.
const SYSTEM_CLASSES: &[(&str, ControlKind)] = &[
    ("STATIC", ControlKind::Label),
    ("BUTTON", ControlKind::Button),
    ("EDIT", ControlKind::Edit),
    ("COMBOBOX", ControlKind::ComboBox),
    ("LISTBOX", ControlKind::ListBox),
    ("SCROLLBAR", ControlKind::ScrollBar),
    ("msctls_progress32", ControlKind::ProgressBar),
    ("msctls_trackbar32", ControlKind::TrackBar),
    ("msctls_updown32", ControlKind::UpDown),
    ("msctls_statusbar32", ControlKind::StatusBar),
    ("SysListView32", ControlKind::ListView),
    ("SysTreeView32", ControlKind::TreeView),
    ("SysTabControl32", ControlKind::TabControl),
    ("RichEdit20W", ControlKind::RichEdit),
    ("RichEdit20A", ControlKind::RichEdit),
    ("RICHEDIT50W", ControlKind::RichEdit),
    ("SysLink", ControlKind::Link),
    ("SysDateTimePick32", ControlKind::DateTimePicker),
    ("SysMonthCal32", ControlKind::MonthCalendar),
];

// Class-name macros without their `W`/`A` suffix, mapped to the class string they expand to.
const CLASS_MACROS: &[(&str, &str)] = &[
    ("WC_BUTTON", "Button"),
    ("WC_STATIC", "Static"),
    ("WC_EDIT", "Edit"),
    ("WC_COMBOBOX", "ComboBox"),
    ("WC_LISTBOX", "ListBox"),
    ("WC_SCROLLBAR", "ScrollBar"),
    ("WC_LISTVIEW", "SysListView32"),
    ("WC_TREEVIEW", "SysTreeView32"),
    ("WC_TABCONTROL", "SysTabControl32"),
    ("PROGRESS_CLASS", "msctls_progress32"),
    ("TRACKBAR_CLASS", "msctls_trackbar32"),
    ("UPDOWN_CLASS", "msctls_updown32"),
    ("STATUSCLASSNAME", "msctls_statusbar32"),
    ("MSFTEDIT_CLASS", "RICHEDIT50W"),
    ("RICHEDIT_CLASSA", "RichEdit20A"),
    ("RICHEDIT_CLASS", "RichEdit20W"),
    ("WC_LINK", "SysLink"),
    ("DATETIMEPICK_CLASS", "SysDateTimePick32"),
    ("MONTHCAL_CLASS", "SysMonthCal32"),
];

// Button styles that change what a `BUTTON` actually is. Later rows never override earlier ones.
const BUTTON_STYLE_KINDS: &[(&str, ControlKind)] = &[
    ("BS_CHECKBOX", ControlKind::CheckBox),
    ("BS_AUTOCHECKBOX", ControlKind::CheckBox),
    ("BS_3STATE", ControlKind::CheckBox),
    ("BS_AUTO3STATE", ControlKind::CheckBox),
    ("BS_RADIOBUTTON", ControlKind::RadioButton),
    ("BS_AUTORADIOBUTTON", ControlKind::RadioButton),
    ("BS_GROUPBOX", ControlKind::GroupBox),
];

/// Maps a decoded class name to its control kind.
///
/// Exact spelling wins; otherwise an ASCII case-insensitive match is tried, so
/// `"Button"` and `"button"` classify the same as `"BUTTON"`. Anything else is
/// `ControlKind::Unknown`.
pub fn classify_class_name(class_name: &str) -> ControlKind {
    SYSTEM_CLASSES
        .iter()
        .find(|(name, _)| *name == class_name)
        .or_else(|| {
            SYSTEM_CLASSES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(class_name))
        })
        .map_or(ControlKind::Unknown, |(_, kind)| *kind)
}

/// Resolves a class-name macro such as `PROGRESS_CLASSW` or `WC_BUTTON` to the class string it denotes.
pub fn resolve_class_macro(identifier: &str) -> Option<&'static str> {
    let lookup = |name: &str| {
        CLASS_MACROS
            .iter()
            .find(|(macro_name, _)| *macro_name == name)
            .map(|(_, class_name)| *class_name)
    };
    lookup(identifier).or_else(|| {
        identifier
            .strip_suffix('W')
            .or_else(|| identifier.strip_suffix('A'))
            .and_then(lookup)
    })
}

/*
 * Narrows a `Button` to checkbox, radio button or group box when one of the
 * style tokens says so. Other kinds pass through untouched.
 */
pub fn refine_button_kind(kind: ControlKind, styles: &[String]) -> ControlKind {
    if kind != ControlKind::Button {
        return kind;
    }
    BUTTON_STYLE_KINDS
        .iter()
        .find(|(style, _)| styles.iter().any(|s| s == style))
        .map_or(kind, |(_, refined)| *refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_system_class() {
        assert_eq!(classify_class_name("STATIC"), ControlKind::Label);
        assert_eq!(classify_class_name("msctls_trackbar32"), ControlKind::TrackBar);
    }

    #[test]
    fn test_classify_falls_back_to_case_insensitive() {
        assert_eq!(classify_class_name("Button"), ControlKind::Button);
        assert_eq!(classify_class_name("MSCTLS_PROGRESS32"), ControlKind::ProgressBar);
        assert_eq!(classify_class_name("richedit50w"), ControlKind::RichEdit);
    }

    #[test]
    fn test_classify_unknown_class_is_not_an_error() {
        assert_eq!(classify_class_name("MyFancyPanel"), ControlKind::Unknown);
        assert_eq!(classify_class_name(""), ControlKind::Unknown);
    }

    #[test]
    fn test_resolve_class_macro_with_and_without_suffix() {
        assert_eq!(resolve_class_macro("PROGRESS_CLASS"), Some("msctls_progress32"));
        assert_eq!(resolve_class_macro("PROGRESS_CLASSW"), Some("msctls_progress32"));
        assert_eq!(resolve_class_macro("TRACKBAR_CLASSA"), Some("msctls_trackbar32"));
        assert_eq!(resolve_class_macro("WC_BUTTONW"), Some("Button"));
        assert_eq!(resolve_class_macro("RICHEDIT_CLASSA"), Some("RichEdit20A"));
        assert_eq!(resolve_class_macro("RICHEDIT_CLASSW"), Some("RichEdit20W"));
        assert_eq!(resolve_class_macro("IDC_OK"), None);
    }

    #[test]
    fn test_every_class_macro_resolves_to_a_known_kind() {
        for (macro_name, class_name) in CLASS_MACROS {
            assert_ne!(
                classify_class_name(class_name),
                ControlKind::Unknown,
                "{macro_name} expands to an unclassified class"
            );
        }
    }

    #[test]
    fn test_refine_button_kind_by_style() {
        // Arrange
        let styles = vec!["WS_CHILD".to_string(), "BS_AUTORADIOBUTTON".to_string()];
        let plain = vec!["WS_CHILD".to_string(), "BS_PUSHBUTTON".to_string()];
        // Act / Assert
        assert_eq!(
            refine_button_kind(ControlKind::Button, &styles),
            ControlKind::RadioButton
        );
        assert_eq!(refine_button_kind(ControlKind::Button, &plain), ControlKind::Button);
        assert_eq!(refine_button_kind(ControlKind::Label, &styles), ControlKind::Label);
    }
}
