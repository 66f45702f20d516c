#![cfg(kani)]

use rtv::Rtv;

/// Pushing B elements then popping them back returns to an empty, valid Rtv.
#[kani::proof]
#[kani::unwind(33)]
fn push_then_pop_b_times_returns_to_empty() {
    let mut v: Rtv<u8> = Rtv::new();
    for i in 0..32u8 {
        v.push(i);
    }
    assert_eq!(v.size(), 32);
    assert!(v.validate().is_ok());

    for _ in 0..32 {
        v.pop();
    }
    assert_eq!(v.size(), 0);
    assert!(v.validate().is_ok());
}

/// Structural invariants hold after any bounded sequence of pushes,
/// regardless of how many.
#[kani::proof]
#[kani::unwind(9)]
fn validate_holds_after_bounded_pushes() {
    let count: usize = kani::any();
    kani::assume(count <= 8);

    let mut v: Rtv<u8> = Rtv::new();
    for i in 0..count {
        v.push(i as u8);
        assert!(v.validate().is_ok());
    }
    assert_eq!(v.size(), count);
}

/// `set` never changes the vector's size nor any element other than the one
/// addressed.
#[kani::proof]
#[kani::unwind(5)]
fn set_touches_only_the_addressed_index() {
    let mut v: Rtv<u8> = Rtv::new();
    for i in 0..4u8 {
        v.push(i);
    }
    let index: usize = kani::any();
    kani::assume(index < 4);
    let replacement: u8 = kani::any();

    v.set(index, replacement);

    assert_eq!(v.size(), 4);
    assert_eq!(*v.get(index), replacement);
    assert!(v.validate().is_ok());
}
