//! Optional `proptest::strategy::Strategy` support for `Rtv<T>`, gated
//! behind the `proptest` feature. `im::Vector` ships the same kind of
//! function-based strategy (a size range plus an element strategy) rather
//! than a blanket `Arbitrary` impl, since the element strategy and the
//! length distribution both need to be caller-chosen.

use proptest::collection::{SizeRange, vec};
use proptest::strategy::Strategy;

use super::Rtv;

/// A strategy that builds an `Rtv<T>` by generating a `Vec<T>` with
/// `element` and `size`, then pushing it element by element — exercising
/// the same `push` path a caller would use.
pub fn rtv<T, S>(element: S, size: impl Into<SizeRange>) -> impl Strategy<Value = Rtv<T>>
where
    T: Clone + std::fmt::Debug,
    S: Strategy<Value = T>,
{
    vec(element, size).prop_map(Rtv::from_iterator)
}
