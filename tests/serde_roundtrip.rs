#![cfg(feature = "serde")]

use rtv::Rtv;

#[test]
fn serializes_as_the_element_sequence() {
    let v: Rtv<i32> = Rtv::from_iterator(0..200);
    let json = serde_json::to_string(&v).unwrap();
    let round_tripped: Rtv<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(v, round_tripped);
}
