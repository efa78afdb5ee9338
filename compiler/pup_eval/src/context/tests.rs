#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use pup_runtime::EvalErrorKind;

fn current_name(context: &EvaluationContext) -> Option<&str> {
    context.current().name()
}

#[test]
fn test_new_context_starts_at_root() {
    let context = EvaluationContext::new();
    assert_eq!(context.current_id(), ScopeId::ROOT);
    assert_eq!(current_name(&context), Some(ROOT_SCOPE));
    assert_eq!(context.depth(), 1);
}

#[test]
fn test_push_then_pop_restores_parent() {
    let mut context = EvaluationContext::new();
    context.push("A", None).unwrap();
    context.push("B", Some("A")).unwrap();
    assert_eq!(current_name(&context), Some("B"));
    context.pop().unwrap();
    assert_eq!(current_name(&context), Some("A"));
}

#[test]
fn test_pop_at_root_fails_without_change() {
    let mut context = EvaluationContext::new();
    let err = context.pop().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RootScopePop);
    assert_eq!(context.depth(), 1);
    assert_eq!(context.current_id(), ScopeId::ROOT);
}

#[test]
fn test_duplicate_push_fails_without_change() {
    let mut context = EvaluationContext::new();
    context.push("A", None).unwrap();
    context.pop().unwrap();
    let err = context.push("A", None).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::DuplicateScope {
            name: "A".to_string()
        }
    );
    assert_eq!(context.depth(), 1);
}

#[test]
fn test_unknown_parent_fails() {
    let mut context = EvaluationContext::new();
    let err = context.push("B", Some("Missing")).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnknownScope { .. }));
    assert_eq!(context.find("B"), None);
    assert_eq!(context.depth(), 1);
}

#[test]
fn test_lookup_walks_named_parent_chain_not_stack() {
    let mut context = EvaluationContext::new();
    context.current_mut().set("top", Value::int(0)).unwrap();
    context.push("A", None).unwrap();
    context.current_mut().set("a", Value::int(1)).unwrap();
    context.pop().unwrap();

    context.push("C", None).unwrap();
    context.current_mut().set("c", Value::int(3)).unwrap();
    // B inherits from A although C is the active scope.
    context.push("B", Some("A")).unwrap();

    assert_eq!(context.lookup("a"), Some(&Value::int(1)));
    assert_eq!(context.lookup("top"), Some(&Value::int(0)));
    assert_eq!(context.lookup("c"), None);
}

#[test]
fn test_lookup_undefined_is_none() {
    let context = EvaluationContext::new();
    assert_eq!(context.lookup("nope"), None);
}

#[test]
fn test_qualified_lookup() {
    let mut context = EvaluationContext::new();
    context.current_mut().set("x", Value::string("root")).unwrap();
    context.push("a::b", None).unwrap();
    context.current_mut().set("x", Value::string("inner")).unwrap();
    context.pop().unwrap();
    context.push("other", None).unwrap();

    assert_eq!(context.lookup("a::b::x"), Some(&Value::string("inner")));
    assert_eq!(context.lookup("::a::b::x"), Some(&Value::string("inner")));
    assert_eq!(context.lookup("::x"), Some(&Value::string("root")));
    assert_eq!(context.lookup("missing::x"), None);
}

#[test]
fn test_reassignment_is_refused() {
    let mut context = EvaluationContext::new();
    context.current_mut().set("x", Value::int(1)).unwrap();
    let err = context.current_mut().set("x", Value::int(2)).unwrap_err();
    assert_eq!(
        err,
        ScopeError::Reassignment {
            name: "x".to_string()
        }
    );
    assert_eq!(context.lookup("x"), Some(&Value::int(1)));

    let eval: EvalError = err.into();
    assert_eq!(eval.message, "cannot reassign variable '$x'");
}

#[test]
fn test_inner_scope_may_shadow() {
    let mut context = EvaluationContext::new();
    context.current_mut().set("x", Value::int(1)).unwrap();
    context.push_local();
    context.current_mut().set("x", Value::int(2)).unwrap();
    assert_eq!(context.lookup("x"), Some(&Value::int(2)));
    context.pop().unwrap();
    assert_eq!(context.lookup("x"), Some(&Value::int(1)));
}

#[test]
fn test_captures_follow_chain_and_failed_search_hides_them() {
    let mut context = EvaluationContext::new();
    context
        .current_mut()
        .set_captures(vec![Value::string("ab"), Value::string("b")]);
    context.push_local();
    assert_eq!(context.lookup("1"), Some(&Value::string("b")));

    context.current_mut().clear_captures();
    assert_eq!(context.lookup("0"), None);
    context.pop().unwrap();
    assert_eq!(context.lookup("0"), Some(&Value::string("ab")));
    assert_eq!(context.lookup("7"), None);
}

#[test]
fn test_scoped_guard_pops_on_drop() {
    let mut context = EvaluationContext::new();
    {
        let mut scoped = context.scoped("A", None).unwrap();
        scoped.current_mut().set("x", Value::int(1)).unwrap();
        assert_eq!(scoped.depth(), 2);
    }
    assert_eq!(context.depth(), 1);
    // The scope outlives its activation.
    assert_eq!(context.lookup("A::x"), Some(&Value::int(1)));
}

#[test]
fn test_scoped_guard_pops_on_error_path() {
    let mut context = EvaluationContext::new();
    let result: Result<(), EvalError> = context.with_scope("A", None, |scoped| {
        scoped.current_mut().set("x", Value::int(1))?;
        scoped.current_mut().set("x", Value::int(2))?;
        Ok(())
    });
    assert!(matches!(
        result.map_err(|e| e.kind),
        Err(EvalErrorKind::Reassignment { .. })
    ));
    assert_eq!(context.current_id(), ScopeId::ROOT);
}

#[test]
fn test_scoped_guard_tolerates_manual_pop() {
    let mut context = EvaluationContext::new();
    context.push("outer", None).unwrap();
    {
        let mut scoped = context.scoped_local();
        scoped.pop().unwrap();
    }
    // The guard must not pop "outer" on behalf of the body.
    assert_eq!(current_name(&context), Some("outer"));
}

#[test]
fn test_duplicate_scoped_leaves_stack_alone() {
    let mut context = EvaluationContext::new();
    context.push("A", None).unwrap();
    assert!(context.scoped("A", None).is_err());
    assert_eq!(current_name(&context), Some("A"));
}
