#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use pup_ir::Span;
use pup_runtime::{AritySubject, EvalErrorKind, EvalResult, Type, TypeAlias, Value};

use crate::context::EvaluationContext;
use crate::dispatch::{Block, Dispatcher, FnBlock, Operand};

const CALL: Span = Span::new(0, 40);

fn call(
    context: &mut EvaluationContext,
    name: &str,
    arguments: Vec<Value>,
    block: Option<&mut dyn Block>,
) -> EvalResult {
    let arguments = arguments
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let start = 5 + 10 * u32::try_from(i).unwrap();
            Operand::new(value, Span::new(start, start + 3))
        })
        .collect();
    Dispatcher::shared().dispatch_function(name, arguments, block, CALL, context)
}

/// Run `each` over `argument`, collecting the arguments of every block call.
fn each_calls(argument: Value, parameters: usize) -> (EvalResult, Vec<Vec<Value>>) {
    let mut context = EvaluationContext::new();
    let mut seen = Vec::new();
    let mut block = FnBlock::new(parameters, |_, args| {
        seen.push(args);
        Ok(Value::Undef)
    });
    let result = call(&mut context, "each", vec![argument], Some(&mut block));
    (result, seen)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn i(n: i64) -> Value {
    Value::int(n)
}

#[test]
fn test_each_hash_one_parameter_yields_pairs() {
    let hash = Value::hash_from_pairs([(s("a"), i(1)), (s("b"), i(2))]);
    let (result, seen) = each_calls(hash.clone(), 1);
    assert_eq!(result, Ok(hash));
    assert_eq!(
        seen,
        vec![
            vec![Value::array(vec![s("a"), i(1)])],
            vec![Value::array(vec![s("b"), i(2)])],
        ]
    );
}

#[test]
fn test_each_hash_two_parameters_yields_key_and_value() {
    let hash = Value::hash_from_pairs([(s("a"), i(1)), (s("b"), i(2))]);
    let (_, seen) = each_calls(hash, 2);
    assert_eq!(seen, vec![vec![s("a"), i(1)], vec![s("b"), i(2)]]);
}

#[test]
fn test_each_array_with_index() {
    let (result, seen) = each_calls(Value::array(vec![s("x"), s("y")]), 2);
    assert_eq!(result, Ok(Value::array(vec![s("x"), s("y")])));
    assert_eq!(seen, vec![vec![i(0), s("x")], vec![i(1), s("y")]]);
}

#[test]
fn test_each_string_yields_characters() {
    let (_, seen) = each_calls(s("hé"), 1);
    assert_eq!(seen, vec![vec![s("h")], vec![s("é")]]);
}

#[test]
fn test_each_integer_counts_from_zero() {
    let (_, seen) = each_calls(i(3), 1);
    assert_eq!(seen, vec![vec![i(0)], vec![i(1)], vec![i(2)]]);
    let (_, seen) = each_calls(i(0), 1);
    assert!(seen.is_empty());
}

#[test]
fn test_each_integer_range_type_excludes_upper_bound() {
    let (result, seen) = each_calls(Value::type_value(Type::integer_range(3, 5)), 2);
    assert!(result.is_ok());
    assert_eq!(seen, vec![vec![i(0), i(3)], vec![i(1), i(4)]]);
}

#[test]
fn test_each_range_through_alias() {
    let alias = TypeAlias::new("Small");
    alias.resolve(Type::integer_range(1, 3)).unwrap();
    let (_, seen) = each_calls(Value::type_value(Type::Alias(alias)), 1);
    assert_eq!(seen, vec![vec![i(1)], vec![i(2)]]);
}

#[test]
fn test_each_unbounded_range_is_rejected() {
    let (result, seen) = each_calls(Value::type_value(Type::integer_range(0, i64::MAX)), 1);
    let err = result.unwrap_err();
    assert_eq!(
        err.message,
        "cannot enumerate Integer[0, default]: 'from' or 'to' is a default value"
    );
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert_eq!(err.span, Some(Span::new(5, 8)));
    assert!(seen.is_empty());
}

#[test]
fn test_each_iterator_walks_its_source() {
    let iterator = Value::iterator(Value::array(vec![i(7), i(8)]), Type::integer());
    let (result, seen) = each_calls(iterator.clone(), 1);
    assert_eq!(result, Ok(iterator));
    assert_eq!(seen, vec![vec![i(7)], vec![i(8)]]);
}

#[test]
fn test_each_rejects_non_enumerable() {
    let (result, _) = each_calls(Value::boolean(true), 1);
    let err = result.unwrap_err();
    assert_eq!(
        err.message,
        "expected String or Integer or Array or Hash or Iterator or Type[Integer] for 'each' but found Boolean"
    );
    assert_eq!(err.span, Some(Span::new(5, 8)));
}

#[test]
fn test_each_checks_block_before_argument_kind() {
    let mut context = EvaluationContext::new();
    let err = call(&mut context, "each", vec![Value::boolean(true)], None).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Arity {
            subject: AritySubject::Block,
            ..
        }
    ));
    assert_eq!(err.span, Some(CALL));

    let mut block = FnBlock::new(3, |_, _| Ok(Value::Undef));
    let arguments = vec![Value::boolean(true)];
    let err = call(&mut context, "each", arguments, Some(&mut block)).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Arity {
            subject: AritySubject::BlockParameters,
            ..
        }
    ));
    assert_eq!(context.depth(), 1);
}

#[test]
fn test_each_argument_count() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(1, |_, _| Ok(Value::Undef));
    let err = call(&mut context, "each", vec![i(1), i(2)], Some(&mut block)).unwrap_err();
    assert_eq!(
        err.message,
        "expected 1 argument to 'each' function but 2 were given"
    );
    assert_eq!(err.span, Some(Span::new(15, 18)));

    let err = call(&mut context, "each", vec![], Some(&mut block)).unwrap_err();
    assert_eq!(err.span, Some(CALL));
}

#[test]
fn test_each_requires_block_with_one_or_two_parameters() {
    let mut context = EvaluationContext::new();
    let err = call(&mut context, "each", vec![i(1)], None).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Arity {
            subject: AritySubject::Block,
            ..
        }
    ));

    for parameters in [0, 3] {
        let mut block = FnBlock::new(parameters, |_, _| Ok(Value::Undef));
        let err = call(&mut context, "each", vec![i(1)], Some(&mut block)).unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::Arity {
                subject: AritySubject::BlockParameters,
                ..
            }
        ));
    }
}

#[test]
fn test_each_block_runs_in_fresh_local_scope() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(1, |ctx: &mut EvaluationContext, mut args: Vec<Value>| {
        // Rebinding per call must not trip the reassignment check.
        ctx.current_mut().set("x", args.remove(0))?;
        assert!(ctx.current().name().is_none());
        Ok(Value::Undef)
    });
    call(&mut context, "each", vec![i(3)], Some(&mut block)).unwrap();
    assert_eq!(context.depth(), 1);
    assert_eq!(context.lookup("x"), None);
}

#[test]
fn test_each_block_error_stops_and_pops() {
    let mut context = EvaluationContext::new();
    let mut calls = 0;
    let mut block = FnBlock::new(1, |_, _| {
        calls += 1;
        Err(pup_runtime::type_mismatch("String", "Integer", ""))
    });
    let result = call(&mut context, "each", vec![i(5)], Some(&mut block));
    drop(block);
    assert!(result.is_err());
    assert_eq!(calls, 1);
    assert_eq!(context.depth(), 1);
}

#[test]
fn test_reduce_without_memo() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(2, |_, args: Vec<Value>| {
        Ok(i(args[0].as_int().unwrap() + args[1].as_int().unwrap()))
    });
    let result = call(
        &mut context,
        "reduce",
        vec![Value::array(vec![i(1), i(2), i(3)])],
        Some(&mut block),
    );
    assert_eq!(result, Ok(i(6)));
}

#[test]
fn test_reduce_with_memo_over_hash() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(2, |_, args: Vec<Value>| {
        let mut memo = args[0].clone();
        if let Some(items) = memo.array_mut() {
            items.push(args[1].clone());
        }
        Ok(memo)
    });
    let hash = Value::hash_from_pairs([(s("a"), i(1))]);
    let result = call(
        &mut context,
        "reduce",
        vec![hash, Value::array(vec![])],
        Some(&mut block),
    );
    assert_eq!(
        result,
        Ok(Value::array(vec![Value::array(vec![s("a"), i(1)])]))
    );
}

#[test]
fn test_reduce_empty_is_undef() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(2, |_, _| Ok(i(1)));
    let result = call(&mut context, "reduce", vec![i(0)], Some(&mut block));
    assert_eq!(result, Ok(Value::Undef));
}

#[test]
fn test_reduce_requires_two_parameters() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(1, |_, _| Ok(i(1)));
    let err = call(&mut context, "reduce", vec![i(3)], Some(&mut block)).unwrap_err();
    assert_eq!(
        err.message,
        "expected 2 block parameters for 'reduce' function but 1 was declared"
    );
}

#[test]
fn test_reduce_checks_block_before_argument_kind() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(1, |_, _| Ok(i(1)));
    let err = call(&mut context, "reduce", vec![Value::Undef], Some(&mut block)).unwrap_err();
    assert_eq!(
        err.message,
        "expected 2 block parameters for 'reduce' function but 1 was declared"
    );

    let mut block = FnBlock::new(2, |_, _| Ok(i(1)));
    let arguments = vec![Value::Undef, i(0)];
    let err = call(&mut context, "reduce", arguments, Some(&mut block)).unwrap_err();
    assert_eq!(
        err.message,
        "expected (String, Any) or (Integer, Any) or (Array, Any) or (Hash, Any) or \
         (Iterator, Any) or (Type[Integer], Any) for 'reduce' but found (Undef, Integer)"
    );
    assert_eq!(err.span, Some(Span::new(5, 8)));
}

#[test]
fn test_reduce_argument_count() {
    let mut context = EvaluationContext::new();
    let mut block = FnBlock::new(2, |_, _| Ok(i(1)));
    let err = call(&mut context, "reduce", vec![i(1), i(2), i(3)], Some(&mut block)).unwrap_err();
    assert_eq!(
        err.message,
        "expected 1 or 2 arguments to 'reduce' function but 3 were given"
    );
}
