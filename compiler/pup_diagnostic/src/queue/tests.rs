use super::*;
use pretty_assertions::assert_eq;
use pup_ir::Span;

use crate::ErrorCode;

fn error_at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E6001)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn test_flush_sorts_by_offset() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(error_at(30, "third"));
    queue.add(error_at(10, "first"));
    queue.add(error_at(20, "second"));

    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert_eq!(queue.error_count(), 0);
    assert!(queue.peek().next().is_none());
}

#[test]
fn test_error_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    assert!(queue.add(error_at(1, "a")));
    assert!(queue.add(error_at(2, "b")));
    assert!(queue.limit_reached());
    assert!(!queue.add(error_at(3, "c")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_dedup_same_offset_same_prefix() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(5, "expected Numeric but found String")));
    assert!(!queue.add(error_at(5, "expected Numeric but found String")));
    assert!(queue.add(error_at(6, "expected Numeric but found String")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.add(error_at(5, "same")));
    assert!(queue.add(error_at(5, "same")));
    assert_eq!(queue.peek().count(), 2);
}

#[test]
fn test_flush_resets_dedup_and_count() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(5, "same")));
    assert!(queue.has_errors());
    assert_eq!(queue.flush().len(), 1);
    assert!(!queue.has_errors());
    assert!(queue.add(error_at(5, "same")));
}
