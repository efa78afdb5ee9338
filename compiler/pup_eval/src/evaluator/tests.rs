#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use pup_diagnostic::{DiagnosticConfig, ErrorCode};
use pup_ir::{BinaryOp, Span};
use pup_runtime::{EvalErrorKind, Type, Value};

use super::Evaluator;
use crate::context::EvaluationContext;
use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor, Dispatcher, FnBlock, Operand};

fn operand(value: Value, start: u32) -> Operand {
    Operand::new(value, Span::new(start, start + 1))
}

#[test]
fn test_default_evaluator_uses_shared_table() {
    let evaluator = Evaluator::new();
    assert!(std::ptr::eq(evaluator.dispatcher(), Dispatcher::shared()));
    assert_eq!(evaluator.context().depth(), 1);
    assert!(!evaluator.has_errors());
}

#[test]
fn test_evaluate_binary() {
    let mut evaluator = Evaluator::new();
    let result = evaluator.evaluate_binary(
        BinaryOp::Minus,
        operand(Value::int(5), 0),
        operand(Value::int(3), 4),
    );
    assert_eq!(result, Ok(Value::int(2)));
}

#[test]
fn test_match_captures_land_in_current_scope() {
    let mut evaluator = Evaluator::new();
    evaluator.context_mut().push("outer", None).unwrap();
    let result = evaluator.evaluate_binary(
        BinaryOp::Match,
        operand(Value::string("abc"), 0),
        operand(Value::string("b(c)"), 7),
    );
    assert_eq!(result, Ok(Value::boolean(true)));
    assert_eq!(evaluator.context().lookup("1"), Some(&Value::string("c")));
    evaluator.context_mut().pop().unwrap();
    assert_eq!(evaluator.context().lookup("1"), None);
}

#[test]
fn test_call_function() {
    let mut evaluator = Evaluator::new();
    let mut total = 0;
    let mut block = FnBlock::new(1, |_, args: Vec<Value>| {
        total += args[0].as_int().unwrap();
        Ok(Value::Undef)
    });
    let result = evaluator.call_function(
        "each",
        vec![operand(Value::array(vec![Value::int(2), Value::int(5)]), 5)],
        Some(&mut block),
        Span::new(0, 20),
    );
    drop(block);
    assert!(result.is_ok());
    assert_eq!(total, 7);
}

#[test]
fn test_unknown_function() {
    let mut evaluator = Evaluator::new();
    let err = evaluator
        .call_function("map", vec![], None, Span::new(3, 9))
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownCallable {
            name: "map".to_string()
        }
    );
    assert_eq!(err.span, Some(Span::new(3, 9)));
}

#[test]
fn test_report_queues_diagnostic() {
    let mut evaluator = Evaluator::new();
    let err = evaluator
        .evaluate_binary(
            BinaryOp::Minus,
            operand(Value::int(i64::MIN), 10),
            operand(Value::int(1), 14),
        )
        .unwrap_err();
    assert!(evaluator.report(&err));
    assert!(evaluator.has_errors());

    let diagnostics = evaluator.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E6002);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(10, 11)));
    assert_eq!(diagnostics[0].message, err.message);
    assert!(!evaluator.has_errors());
}

#[test]
fn test_reported_passes_values_through() {
    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.reported(Ok(Value::int(1))), Some(Value::int(1)));
    assert!(!evaluator.has_errors());

    let failed = evaluator.evaluate_binary(
        BinaryOp::Less,
        operand(Value::boolean(true), 0),
        operand(Value::int(1), 5),
    );
    assert_eq!(evaluator.reported(failed), None);
    assert_eq!(evaluator.diagnostics().error_count(), 1);
}

#[test]
fn test_error_limit() {
    let mut evaluator = Evaluator::builder()
        .diagnostic_config(DiagnosticConfig {
            error_limit: 2,
            deduplicate: false,
        })
        .build();
    let err = pup_runtime::root_scope_pop();
    assert!(evaluator.report(&err));
    assert!(evaluator.report(&err));
    assert!(!evaluator.report(&err));
    assert_eq!(evaluator.diagnostics().error_count(), 2);
}

fn always_forty_two(_: BinaryCall<'_>) -> pup_runtime::EvalResult {
    Ok(Value::int(42))
}

#[test]
fn test_custom_dispatcher() {
    let mut dispatcher = Dispatcher::builtin();
    let mut minus = Descriptor::<BinaryHandler>::new("-");
    minus.add([Type::Any, Type::Any], always_forty_two);
    dispatcher.register_binary(BinaryOp::Minus, minus);

    let mut evaluator = Evaluator::builder().dispatcher(dispatcher).build();
    assert!(!std::ptr::eq(evaluator.dispatcher(), Dispatcher::shared()));
    let result = evaluator.evaluate_binary(
        BinaryOp::Minus,
        Value::string("x").into(),
        Value::int(1).into(),
    );
    assert_eq!(result, Ok(Value::int(42)));
    // Other operators are untouched.
    let result = evaluator.evaluate_binary(
        BinaryOp::Equals,
        Value::int(1).into(),
        Value::float(1.0).into(),
    );
    assert_eq!(result, Ok(Value::boolean(true)));
}

#[test]
fn test_seeded_context() {
    let mut context = EvaluationContext::new();
    context.push("app", None).unwrap();
    context.current_mut().set("x", Value::int(1)).unwrap();

    let evaluator = Evaluator::builder().context(context).build();
    assert_eq!(evaluator.context().depth(), 2);
    assert_eq!(evaluator.context().lookup("app::x"), Some(&Value::int(1)));
}

#[test]
fn test_is_instance() {
    let evaluator = Evaluator::new();
    assert!(evaluator.is_instance(&Type::integer_range(0, 9), &Value::int(3)));
    assert!(!evaluator.is_instance(&Type::string(), &Value::int(3)));
}
