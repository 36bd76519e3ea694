/*
 * End-to-end import scenarios driven through the public entry point, using
 * window-construction code shaped like what the editor imports in practice.
 */
use pretty_assertions::assert_eq;
use win32_import_parser::{
    ControlKind, ImportError, ImportParser, parse_controls_from_code,
};

const DIALOG_CODE: &str = r#"
HWND hLabel = CreateWindowExW(0, L"STATIC", L"Wide Label", WS_CHILD | WS_VISIBLE,
    10, 20, 120, 30, hwndParent, (HMENU)101, hInst, nullptr);
HWND hButton = CreateWindowExW(0, u8"BUTTON", u"Wide Button", WS_CHILD | WS_VISIBLE,
    10, 60, 120, 30, hwndParent, 202, hInst, nullptr);
HWND hCastNumber = CreateWindowExW(0, L"BUTTON", L"Number Cast", WS_CHILD | WS_VISIBLE,
    10, 100, 120, 30, hwndParent, (HMENU)303, hInst, nullptr);
HWND hNamedCast = CreateWindowExW(0, L"BUTTON", L"Named Cast", WS_CHILD | WS_VISIBLE,
    10, 140, 120, 30, hwndParent, (HMENU)IDC_STATIC_TEXT, hInst, nullptr);
HWND hNamedReinterpret = CreateWindowExW(0, L"BUTTON", L"Named Reinterpret", WS_CHILD | WS_VISIBLE,
    10, 180, 120, 30, hwndParent, reinterpret_cast<HMENU>(IDC_OK), hInst, nullptr);
"#;

const COMMON_CONTROLS_CODE: &str = r#"
HWND hProgress = CreateWindowExW(0, PROGRESS_CLASS, nullptr, WS_CHILD | WS_VISIBLE,
    10, 220, 200, 16, hwndParent, (HMENU)IDC_PROGRESS, hInst, nullptr);
HWND hSlider = CreateWindowExW(0, TRACKBAR_CLASSW, L"", WS_CHILD | WS_VISIBLE | TBS_AUTOTICKS,
    10, 250, 200, 30, hwndParent, (HMENU)404, hInst, nullptr);
"#;

#[test]
fn test_five_call_dialog_yields_ids_and_names_in_order() {
    // Act
    let controls = parse_controls_from_code(DIALOG_CODE);

    // Assert
    assert_eq!(controls.len(), 5);

    assert_eq!(controls[0].class_name, "STATIC");
    assert_eq!(controls[0].text, "Wide Label");
    assert_eq!(controls[0].kind, ControlKind::Label);

    assert_eq!(controls[1].class_name, "BUTTON");
    assert_eq!(controls[1].text, "Wide Button");
    assert_eq!(controls[1].kind, ControlKind::Button);

    let ids: Vec<Option<i64>> = controls.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![Some(101), Some(202), Some(303), None, None]);

    let names: Vec<Option<&str>> = controls.iter().map(|c| c.id_name.as_deref()).collect();
    assert_eq!(
        names,
        vec![None, None, None, Some("IDC_STATIC_TEXT"), Some("IDC_OK")]
    );
}

#[test]
fn test_records_follow_source_order() {
    let controls = parse_controls_from_code(DIALOG_CODE);
    let captions: Vec<&str> = controls.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        captions,
        vec![
            "Wide Label",
            "Wide Button",
            "Number Cast",
            "Named Cast",
            "Named Reinterpret"
        ]
    );
    assert!(controls.windows(2).all(|pair| pair[0].offset < pair[1].offset));
}

#[test]
fn test_appending_common_controls_only_appends_records() {
    // Arrange
    let original = parse_controls_from_code(DIALOG_CODE);
    let extended_code = format!("{DIALOG_CODE}{COMMON_CONTROLS_CODE}");

    // Act
    let extended = parse_controls_from_code(&extended_code);

    // Assert
    assert_eq!(extended.len(), original.len() + 2);
    assert_eq!(&extended[..original.len()], original.as_slice());

    let progress = &extended[5];
    assert_eq!(progress.kind, ControlKind::ProgressBar);
    assert_eq!(progress.class_name, "msctls_progress32");
    assert_eq!(progress.text, "");
    assert_eq!(progress.id_name.as_deref(), Some("IDC_PROGRESS"));

    let slider = &extended[6];
    assert_eq!(slider.kind, ControlKind::TrackBar);
    assert_eq!(slider.id, Some(404));
    assert!(slider.has_style("TBS_AUTOTICKS"));
}

#[test]
fn test_geometry_is_recovered_for_literal_positions() {
    let controls = parse_controls_from_code(DIALOG_CODE);
    let tops: Vec<Option<i32>> = controls
        .iter()
        .map(|c| c.bounds.map(|bounds| bounds.y))
        .collect();
    assert_eq!(tops, vec![Some(20), Some(60), Some(100), Some(140), Some(180)]);
}

#[test]
fn test_broken_calls_degrade_without_failing_the_scan() {
    // Arrange
    let code = format!(
        "{DIALOG_CODE}\n{}\n{}",
        r#"CreateWindowExW(0, GetClassName(), L"Dynamic", WS_CHILD, 0, 0, 1, 1, h, 1, i, nullptr);"#,
        r#"CreateWindowExW(0, L"EDIT", L"Computed id", WS_CHILD, 0, 0, 1, 1, h, IDC_BASE + 1, i, nullptr);"#,
    );

    // Act
    let report = ImportParser::default().parse(&code);

    // Assert
    assert_eq!(report.controls.len(), 6);
    assert_eq!(report.dropped_count(), 1);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(matches!(
        report.diagnostics[0].error,
        ImportError::MalformedOccurrence { .. }
    ));
    assert_eq!(
        report.diagnostics[1].error,
        ImportError::UnrecognizedIdForm {
            text: "IDC_BASE + 1".to_string()
        }
    );
    let computed = &report.controls[5];
    assert_eq!(computed.text, "Computed id");
    assert_eq!((computed.id, computed.id_name.as_deref()), (None, None));
}
