use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_builder_collects_label_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("expected Numeric but found String")
        .with_label(Span::new(4, 9), "this operand")
        .with_note("operator `-`");

    assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
    assert_eq!(diag.notes, vec!["operator `-`".to_string()]);
}

#[test]
fn test_later_label_replaces_earlier() {
    let diag = Diagnostic::error(ErrorCode::E6008)
        .with_label(Span::new(0, 1), "first")
        .with_label(Span::new(5, 6), "second");
    assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
    assert_eq!(diag.label.map(|label| label.message), Some("second".to_string()));
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::error(ErrorCode::E6002)
        .with_message("subtraction of -9223372036854775808 and 1 results in an arithmetic underflow")
        .with_label(Span::new(10, 30), "here")
        .with_note("integers are 64-bit signed");

    assert_eq!(
        diag.to_string(),
        "error [E6002]: subtraction of -9223372036854775808 and 1 results in an arithmetic underflow\n  \
         --> 10..30: here\n  = note: integers are 64-bit signed"
    );
}

#[test]
fn test_display_without_label() {
    let diag = Diagnostic::error(ErrorCode::E6007).with_message("cannot pop the root scope");
    assert_eq!(diag.to_string(), "error [E6007]: cannot pop the root scope");
}
