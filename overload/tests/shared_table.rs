//! Concurrent registration and invocation.

use std::sync::Arc;
use std::thread;

use unifout_overload::{
    BoundArgs, CallArgs, DispatchError, DispatchTable, Param, SharedDispatchTable, TypeTag, Value,
};

fn describe(args: &BoundArgs<'_, Value>) -> Value {
    let parts: Vec<String> = args.iter().map(|(name, v)| format!("{}={}", name, v)).collect();
    Value::from(parts.join(" "))
}

#[test]
fn test_frozen_table_is_shared_without_locking() {
    let mut table: DispatchTable = DispatchTable::new();
    table
        .register("show", vec![Param::new("x", TypeTag::INT)], describe)
        .unwrap();
    table
        .register("show", vec![Param::new("s", TypeTag::STR)], describe)
        .unwrap();
    let table = Arc::new(table);

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                (0..100)
                    .map(|_| table.call("show", vec![Value::from(i)]))
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap().unwrap();
        assert!(results.iter().all(|v| *v == Value::from(format!("x={}", i))));
    }
}

#[test]
fn test_register_from_many_threads() {
    let shared: SharedDispatchTable = SharedDispatchTable::default();
    let tuple_ish = shared.declare_type("Pair", &[TypeTag::TUPLE]).unwrap();

    thread::scope(|scope| {
        for ty in [TypeTag::INT, TypeTag::STR, TypeTag::FLOAT, tuple_ish] {
            let shared = shared.clone();
            scope.spawn(move || {
                shared
                    .register("show", vec![Param::new("value", ty)], describe)
                    .unwrap();
            });
        }
    });

    assert_eq!(shared.read().family("show").map(|f| f.len()), Some(4));
    assert_eq!(
        shared.call("show", vec![Value::from(2.5)]),
        Ok(Value::from("value=2.5"))
    );

    let err = shared
        .register("show", vec![Param::new("other", TypeTag::INT)], describe)
        .unwrap_err();
    assert!(matches!(err, DispatchError::DuplicateSignature { .. }));
}

#[test]
fn test_concurrent_invocations_through_lock() {
    let shared: SharedDispatchTable = SharedDispatchTable::default();
    shared
        .register(
            "pair",
            vec![
                Param::new("a", TypeTag::INT),
                Param::new("b", TypeTag::INT).with_default(0),
            ],
            describe,
        )
        .unwrap();

    thread::scope(|scope| {
        for i in 0..4i64 {
            let shared = shared.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let args = CallArgs::new().arg(i).kwarg("b", i * 2);
                    assert_eq!(
                        shared.invoke("pair", &args),
                        Ok(Value::from(format!("a={} b={}", i, i * 2)))
                    );
                }
            });
        }
    });
}
