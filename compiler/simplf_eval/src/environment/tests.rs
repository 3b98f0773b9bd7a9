use super::*;
use crate::errors::EvalErrorKind;

fn n(text: &str) -> Name {
    Name::new(text)
}

fn num(v: f64) -> Value {
    Value::Number(v)
}

fn is_undefined(result: &EvalResult, name: &str) -> bool {
    matches!(
        result,
        Err(EvalError { kind: EvalErrorKind::UndefinedVariable { name: found }, .. }) if found == name
    )
}

// define / get

#[test]
fn get_unbound_fails() {
    let env = Environment::global();
    assert!(is_undefined(&env.get(&n("x")), "x"));
}

#[test]
fn define_then_get() {
    let env = Environment::global().define(n("x"), num(1.0));
    assert_eq!(env.get(&n("x")), Ok(num(1.0)));
}

#[test]
fn define_does_not_touch_receiver() {
    let before = Environment::global();
    let after = before.define(n("x"), num(1.0));
    assert!(is_undefined(&before.get(&n("x")), "x"));
    assert_eq!(after.get(&n("x")), Ok(num(1.0)));
    assert!(before.local_names().is_empty());
    assert_eq!(after.local_names(), vec![n("x")]);
}

#[test]
fn define_keeps_enclosing_parent() {
    let outer = Environment::global().define(n("g"), num(1.0));
    let inner = outer.child().define(n("l"), num(2.0));
    assert_eq!(inner.depth(), 1);
    assert_eq!(inner.get(&n("g")), Ok(num(1.0)));
    assert_eq!(inner.local_names(), vec![n("l")]);
    assert!(inner.enclosing().is_some_and(Environment::is_global));
}

#[test]
fn lookup_ascends_to_root() {
    let root = Environment::global().define(n("deep"), num(7.0));
    let env = root.child().child().child();
    assert_eq!(env.depth(), 3);
    assert_eq!(env.get(&n("deep")), Ok(num(7.0)));
    assert!(env.contains(&n("deep")));
    assert!(!env.contains(&n("shallow")));
}

// assign

#[test]
fn assign_unbound_fails_and_creates_nothing() {
    let env = Environment::global().child();
    let err = env.assign(&n("y"), num(1.0));
    assert!(matches!(
        err,
        Err(EvalError { kind: EvalErrorKind::UndefinedVariable { .. }, .. })
    ));
    assert!(!env.contains(&n("y")));
}

#[test]
fn assign_updates_enclosing_binding() {
    let outer = Environment::global().define(n("x"), num(1.0));
    let inner = outer.child();
    assert_eq!(inner.assign(&n("x"), num(2.0)), Ok(()));
    assert_eq!(outer.get(&n("x")), Ok(num(2.0)));
}

// Aliasing

#[test]
fn assign_is_visible_through_shared_tail() {
    let e1 = Environment::global();
    let e2 = e1.define(n("x"), num(1.0));
    // Captured after the define, before further defines on e2.
    let captured = e2.clone();
    let e3 = e2.define(n("y"), num(0.0));

    assert_eq!(e3.assign(&n("x"), num(2.0)), Ok(()));

    assert_eq!(e2.get(&n("x")), Ok(num(2.0)));
    assert_eq!(captured.get(&n("x")), Ok(num(2.0)));
    assert!(is_undefined(&e1.get(&n("x")), "x"));
}

#[test]
fn define_is_not_retroactive() {
    let base = Environment::global().define(n("x"), num(0.0));
    let earlier = base.clone();
    let later = base.define(n("x"), num(1.0));

    assert_eq!(later.assign(&n("x"), num(2.0)), Ok(()));

    // Only the newest binding moved; the view taken earlier never saw it.
    assert_eq!(earlier.get(&n("x")), Ok(num(0.0)));
    assert_eq!(later.get(&n("x")), Ok(num(2.0)));
}

#[test]
fn sibling_chains_do_not_share_new_bindings() {
    let base = Environment::global().define(n("shared"), num(0.0));
    let left = base.define(n("x"), num(1.0));
    let right = base.define(n("x"), num(10.0));

    assert_eq!(left.assign(&n("x"), num(2.0)), Ok(()));
    assert_eq!(right.get(&n("x")), Ok(num(10.0)));

    // But both see updates to the binding they do share.
    assert_eq!(right.assign(&n("shared"), num(5.0)), Ok(()));
    assert_eq!(left.get(&n("shared")), Ok(num(5.0)));
}

// Shadowing

#[test]
fn newest_definition_wins() {
    let env = Environment::global()
        .define(n("x"), num(1.0))
        .define(n("x"), num(2.0));
    assert_eq!(env.get(&n("x")), Ok(num(2.0)));
    assert_eq!(env.local_names(), vec![n("x"), n("x")]);
}

#[test]
fn assign_updates_only_innermost_shadow() {
    let outer = Environment::global().define(n("x"), num(1.0));
    let inner = outer.child().define(n("x"), num(2.0));

    assert_eq!(inner.assign(&n("x"), num(3.0)), Ok(()));

    assert_eq!(inner.get(&n("x")), Ok(num(3.0)));
    assert_eq!(outer.get(&n("x")), Ok(num(1.0)));
}

#[test]
fn assign_updates_newest_of_same_scope_duplicates() {
    let older = Environment::global().define(n("x"), num(1.0));
    let newer = older.define(n("x"), num(2.0));

    assert_eq!(newer.assign(&n("x"), num(3.0)), Ok(()));

    assert_eq!(newer.get(&n("x")), Ok(num(3.0)));
    assert_eq!(older.get(&n("x")), Ok(num(1.0)));
}

// Closures

#[test]
fn plain_closure_is_the_captured_environment() {
    let env = Environment::global().define(n("x"), num(1.0));
    let closure = Closure::new(env.clone());
    let captured = closure.environment(&n("unused"), || Value::Nil);
    assert_eq!(env.assign(&n("x"), num(2.0)), Ok(()));
    assert_eq!(captured.get(&n("x")), Ok(num(2.0)));
    assert!(!captured.contains(&n("unused")));
}

#[test]
fn recursive_closure_shares_binding_while_declaring_scope_lives() {
    let base = Environment::global().define(n("before"), num(1.0));
    let declared = base.define(n("f"), Value::Nil);
    let closure = Closure::recursive(&declared);

    assert_eq!(declared.assign(&n("f"), num(7.0)), Ok(()));
    let captured = closure.environment(&n("f"), || Value::string("fresh"));
    assert_eq!(captured.get(&n("f")), Ok(num(7.0)));
    assert_eq!(captured.get(&n("before")), Ok(num(1.0)));

    assert_eq!(captured.assign(&n("f"), num(8.0)), Ok(()));
    assert_eq!(declared.get(&n("f")), Ok(num(8.0)));
}

#[test]
fn recursive_closure_rebinds_name_after_declaring_scope_is_gone() {
    let base = Environment::global().define(n("before"), num(1.0));
    let closure = Closure::recursive(&base.define(n("f"), Value::Nil));

    let captured = closure.environment(&n("f"), || Value::string("fresh"));
    assert_eq!(captured.get(&n("f")), Ok(Value::string("fresh")));
    assert_eq!(captured.get(&n("before")), Ok(num(1.0)));
    assert_eq!(captured.local_names(), vec![n("f"), n("before")]);
}

// Debug

#[test]
fn debug_lists_local_names() {
    let env = Environment::global()
        .define(n("a"), num(1.0))
        .child()
        .define(n("b"), num(2.0));
    assert_eq!(
        format!("{env:?}"),
        "Environment { locals: [Name(\"b\")], depth: 1 }"
    );
}
