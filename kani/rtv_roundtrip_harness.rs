#![cfg(kani)]

use rtv::Rtv;

#[kani::proof]
#[kani::unwind(5)]
fn push_pop_roundtrip() {
    let value: u8 = kani::any();
    let mut v: Rtv<u8> = Rtv::new();
    v.push(value);
    let popped = v.pop();
    assert_eq!(popped, value);
    assert_eq!(v.size(), 0);
}
