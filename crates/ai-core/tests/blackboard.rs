use ai_core::{BbKey, Blackboard, BlackboardError};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let k_u32 = BbKey::<u32>::new(1);
    let k_str = BbKey::<String>::new(2);

    let mut bb = Blackboard::new();
    assert!(!bb.contains(k_u32));

    bb.set(k_u32, 123);
    bb.set(k_str, "hello".to_string());
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.get(k_u32).copied(), Some(123));
    assert_eq!(bb.get(k_str).map(|s| s.as_str()), Some("hello"));

    assert_eq!(bb.remove(k_u32), Some(123));
    assert_eq!(bb.get(k_u32), None);
}

#[test]
fn get_or_insert_with_only_builds_once() {
    let key = BbKey::<Vec<u64>>::new(7);
    let mut bb = Blackboard::new();

    bb.get_or_insert_with(key, Vec::new).push(1);
    bb.get_or_insert_with(key, || vec![99]).push(2);

    assert_eq!(bb.get(key), Some(&vec![1, 2]));
}

#[test]
fn try_get_reports_type_mismatch() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(1), 1u32);

    let err = bb.try_get(BbKey::<i32>::new(1)).unwrap_err();
    assert!(matches!(err, BlackboardError::TypeMismatch { id: 1, .. }));
    assert_eq!(bb.try_get(BbKey::<i32>::new(2)), Ok(None));
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(1), 1u32);
    let _ = bb.get(BbKey::<i32>::new(1));
}
