mod common;

use chain_hashmap::ChainHashMap;
use common::{insert_unique, int_map};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[test]
fn destructors_run_once_per_surviving_entry() {
    let mut m = int_map::<String>();
    for i in 0..40 {
        insert_unique(&mut m, i, format!("v{i}"));
    }
    for i in (0..40).step_by(4) {
        let _ = m.remove(&i).expect("present");
    }
    let survivors: BTreeSet<i32> = (0..40).filter(|i| i % 4 != 0).collect();

    let keys = RefCell::new(Vec::new());
    let values = RefCell::new(Vec::new());
    m.delete_with(|k| keys.borrow_mut().push(k), |v| values.borrow_mut().push(v));

    let keys = keys.into_inner();
    let values = values.into_inner();
    assert_eq!(keys.len(), survivors.len());
    assert_eq!(values.len(), survivors.len());
    assert_eq!(keys.iter().copied().collect::<BTreeSet<_>>(), survivors);
    let expected_values: BTreeSet<String> = survivors.iter().map(|i| format!("v{i}")).collect();
    assert_eq!(values.into_iter().collect::<BTreeSet<_>>(), expected_values);
}

#[test]
fn key_destructor_runs_before_its_value_destructor() {
    let mut m = int_map::<i32>();
    for i in 0..10 {
        insert_unique(&mut m, i, i + 1000);
    }
    let events = RefCell::new(Vec::new());
    m.delete_with(
        |k| events.borrow_mut().push(("key", k)),
        |v| events.borrow_mut().push(("value", v - 1000)),
    );
    let events = events.into_inner();
    assert_eq!(events.len(), 20);
    for pair in events.chunks(2) {
        assert_eq!(pair[0].0, "key");
        assert_eq!(pair[1].0, "value");
        assert_eq!(pair[0].1, pair[1].1);
    }
}

#[test]
fn replaced_and_removed_payloads_are_not_destroyed_by_teardown() {
    let mut m = int_map::<Rc<()>>();
    let first = Rc::new(());
    let second = Rc::new(());
    insert_unique(&mut m, 1, first.clone());
    let replaced = m.insert(1, second.clone()).expect("replaced value handed back");
    assert!(Rc::ptr_eq(&replaced, &first));

    let mut destroyed = 0;
    m.delete_with(|_| {}, |v| {
        assert!(Rc::ptr_eq(&v, &second));
        destroyed += 1;
    });
    assert_eq!(destroyed, 1);
    // `replaced` is still ours: two strong refs to `first`.
    assert_eq!(Rc::strong_count(&first), 2);
    assert_eq!(Rc::strong_count(&second), 1);
}

#[test]
fn dropping_the_map_drops_surviving_payloads() {
    let token = Rc::new(());
    {
        let mut m: ChainHashMap<u32, Rc<()>> = ChainHashMap::new();
        for i in 0..25 {
            m.insert(i, token.clone());
        }
        assert_eq!(Rc::strong_count(&token), 26);
        let (_, v) = m.remove(&3).expect("present");
        drop(v);
        assert_eq!(Rc::strong_count(&token), 25);
    }
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn teardown_of_never_used_map_calls_nothing() {
    let m = int_map::<i32>();
    m.delete_with(|_| panic!("key destructor"), |_| panic!("value destructor"));
}
