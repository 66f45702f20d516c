use rtv::Rtv;

#[test]
fn keys_yields_ascending_indices() {
    let v: Rtv<i32> = Rtv::from_iterator((10..20).map(|i| i * 10));
    let keys: Vec<usize> = v.keys().collect();
    assert_eq!(keys, (0..10).collect::<Vec<_>>());
}

#[test]
fn items_zips_keys_and_values() {
    let v: Rtv<char> = Rtv::from_iterator(['a', 'b', 'c']);
    let items: Vec<(usize, char)> = v.items().collect();
    assert_eq!(items, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
}

#[test]
fn freeze_shares_structure_and_forbids_mutation() {
    let mut v: Rtv<i32> = Rtv::from_iterator(0..64);
    let frozen = v.freeze();
    v.push(999);
    assert_eq!(frozen.size(), 64);
    assert_eq!(frozen.values().collect::<Vec<_>>(), (0..64).collect::<Vec<_>>());
}
