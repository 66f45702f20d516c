//! The persistent, bit-partitioned radix-tree vector.
//!
//! `Rtv<T>` is the public façade: it owns an optional tree root,
//! the root's shift, the element count stored in the tree (`root_size`,
//! always a multiple of the branch factor), and a mutable tail buffer
//! holding the rightmost not-yet-promoted elements. Everything reachable
//! through `root` is immutable and reference-counted, so `clone`/`freeze`
//! only ever duplicate the tail.

#[cfg(feature = "proptest")]
pub mod arbitrary;
mod error;
mod frozen;
mod iter;
mod node;
mod slot;
mod tail;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub use error::ValidateError;
pub use frozen::Frozen;
pub use iter::{Items, Keys, Values};

use node::{BITS, BRANCH_FACTOR, Node};
use tail::Tail;

/// A persistent, bit-partitioned radix-tree vector. See the crate docs.
pub struct Rtv<T> {
    root: Option<Rc<Node<T>>>,
    shift: u32,
    root_size: usize,
    tail: Tail<T>,
}

impl<T: Clone> Rtv<T> {
    /// An empty RTV. `capacity` is a non-negative hint; this representation
    /// has no allocation to pre-size beyond the empty state, so the hint is
    /// accepted but unused.
    pub fn create(_capacity: usize) -> Self {
        Self::new()
    }

    pub fn new() -> Self {
        Rtv {
            root: None,
            shift: 0,
            root_size: 0,
            tail: Tail::new(),
        }
    }

    /// Bulk-construct by repeated push, validating that the source's
    /// advertised length matches the number of elements it actually yields.
    pub fn from_sequence<I>(seq: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = seq.into_iter();
        let advertised = iter.len();
        let mut rtv = Self::new();
        let mut yielded = 0usize;
        for item in iter {
            rtv.push(item);
            yielded += 1;
        }
        assert_eq!(
            yielded, advertised,
            "from_sequence: iterator advertised length {advertised} but yielded {yielded} elements"
        );
        rtv
    }

    /// Bulk-construct from any iterator, with no length to cross-check
    /// against.
    pub fn from_iterator<I: IntoIterator<Item = T>>(it: I) -> Self {
        let mut rtv = Self::new();
        for item in it {
            rtv.push(item);
        }
        rtv
    }

    pub fn size(&self) -> usize {
        self.root_size + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Panics on out-of-bounds; see [`Rtv::maybe_get`] for the checked form.
    pub fn get(&self, index: usize) -> &T {
        self.get_ref(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for Rtv of size {}", self.size()))
    }

    pub fn maybe_get(&self, index: usize) -> Option<T> {
        self.get_ref(index).cloned()
    }

    fn get_ref(&self, index: usize) -> Option<&T> {
        if index < self.root_size {
            Some(
                self.root
                    .as_ref()
                    .expect("root_size > 0 implies a root")
                    .get(self.shift, index),
            )
        } else if index - self.root_size < self.tail.len() {
            Some(self.tail.get(index - self.root_size))
        } else {
            None
        }
    }

    /// Path-copy update on the tree branch, or a direct tail write. Panics
    /// out-of-bounds; appending via `set` is forbidden, use [`Rtv::push`].
    pub fn set(&mut self, index: usize, value: T) {
        if index < self.root_size {
            let root = self.root.as_ref().expect("root_size > 0 implies a root");
            self.root = Some(root.set(self.shift, index, Rc::new(value)));
        } else if index - self.root_size < self.tail.len() {
            self.tail.set(index - self.root_size, Rc::new(value));
        } else {
            panic!("index {index} out of bounds for Rtv of size {}", self.size());
        }
        self.debug_validate();
    }

    /// Appends `value`. Promotes the tail into the tree (growing depth if
    /// its capacity is exhausted) whenever the tail fills up.
    pub fn push(&mut self, value: T) {
        self.tail.push(Rc::new(value));
        if self.tail.is_full() {
            self.promote_tail();
        }
        self.debug_validate();
    }

    fn promote_tail(&mut self) {
        let tail_leaf = Rc::new(Node::leaf_from_slots(self.tail.slots()));
        match self.root.take() {
            None => {
                self.root = Some(tail_leaf);
                self.shift = 0;
            }
            Some(root) => {
                let capacity = BRANCH_FACTOR << self.shift;
                if self.root_size + BRANCH_FACTOR > capacity {
                    let new_shift = self.shift + BITS;
                    let branch = Node::branch_ladder(self.shift, &tail_leaf);
                    let mut children: Box<[Option<Rc<Node<T>>>; BRANCH_FACTOR]> =
                        Box::new(std::array::from_fn(|_| None));
                    children[0] = Some(root);
                    children[1] = Some(branch);
                    self.root = Some(Rc::new(Node::Internal(children)));
                    self.shift = new_shift;
                } else {
                    self.root = Some(root.push_tail(self.shift, self.root_size, &tail_leaf));
                }
            }
        }
        self.root_size += BRANCH_FACTOR;
        self.tail.clear();
    }

    /// Panics on an empty RTV; see [`Rtv::maybe_pop`] for the checked form.
    pub fn pop(&mut self) -> T {
        self.maybe_pop()
            .unwrap_or_else(|| panic!("pop on an empty Rtv"))
    }

    pub fn maybe_pop(&mut self) -> Option<T> {
        if self.tail.len() > 0 {
            let value = (*self.tail.pop()).clone();
            self.debug_validate();
            return Some(value);
        }
        if self.root_size == 0 {
            return None;
        }

        let value = if self.shift == 0 {
            // The root is itself a single Leaf; detach it directly into the
            // tail rather than recursing through `Node::pop_tail`, which
            // only operates on Internal nodes.
            let leaf = self.root.take().expect("root_size > 0 implies a root");
            self.root_size = 0;
            let popped = leaf.leaf_slots()[BRANCH_FACTOR - 1].get_shared();
            self.tail.reset_from_leaf(leaf.leaf_slots());
            popped
        } else {
            let root = self.root.take().expect("root_size > 0 implies a root");
            let new_root_index = self.root_size - 1;
            let (new_root, leaf) = root.pop_tail(self.shift, new_root_index);
            let popped = leaf.leaf_slots()[BRANCH_FACTOR - 1].get_shared();
            self.tail.reset_from_leaf(leaf.leaf_slots());
            self.root_size -= BRANCH_FACTOR;

            match new_root {
                None => {
                    self.shift = 0;
                    self.root = None;
                }
                Some(new_root) => {
                    let shallower_capacity = BRANCH_FACTOR << (self.shift - BITS);
                    if self.root_size <= shallower_capacity {
                        self.root = Some(new_root.first_child());
                        self.shift -= BITS;
                    } else {
                        self.root = Some(new_root);
                    }
                }
            }
            popped
        };

        self.debug_validate();
        Some((*value).clone())
    }

    pub fn clear(&mut self) {
        self.tail.clear();
        self.root = None;
        self.shift = 0;
        self.root_size = 0;
        self.debug_validate();
    }

    /// Grows with repeated `fill` pushes or shrinks with repeated pops.
    pub fn resize(&mut self, n: usize, fill: T) {
        while self.size() < n {
            self.push(fill.clone());
        }
        while self.size() > n {
            self.pop();
        }
    }

    /// Same cost and structure as [`Clone::clone`]; produces a read-only
    /// snapshot that cannot be mutated back into this RTV's shape.
    pub fn freeze(&self) -> Frozen<T> {
        Frozen {
            root: self.root.clone(),
            shift: self.shift,
            root_size: self.root_size,
            tail: self.tail.clone(),
        }
    }

    pub fn keys(&self) -> Keys {
        Keys::new(self.size())
    }

    /// A snapshot iterator: captures `root`, `shift`, `root_size`, and a
    /// copy of the tail now, so later pushes/pops on `self` are never
    /// observed.
    pub fn values(&self) -> Values<T> {
        Values::new(
            self.root.clone(),
            self.shift,
            self.root_size,
            self.tail.clone(),
        )
    }

    pub fn items(&self) -> Items<T> {
        Items::new(self.values())
    }

    /// Recursive structural audit: checks that the tail is never full at
    /// rest, that `root_size` is a multiple of the branch factor, and that
    /// the tree itself is well-formed (see `Node::validate`). Exposed
    /// directly so tests can call it unconditionally; in non-test code it
    /// only ever runs under the `validate` feature, via [`Rtv::debug_validate`].
    pub fn validate(&self) -> Result<(), ValidateError> {
        if self.tail.len() >= BRANCH_FACTOR {
            return Err(ValidateError::TailFull);
        }
        if self.root_size % BRANCH_FACTOR != 0 {
            return Err(ValidateError::RootSizeNotMultipleOfBranchFactor {
                root_size: self.root_size,
            });
        }
        match &self.root {
            None => {
                if self.root_size != 0 || self.shift != 0 {
                    return Err(ValidateError::AbsentRootWithNonzeroBookkeeping);
                }
            }
            Some(root) => root.validate(self.shift, self.root_size)?,
        }
        Ok(())
    }

    #[cfg(feature = "validate")]
    fn debug_validate(&self) {
        if let Err(err) = self.validate() {
            panic!("Rtv structural invariant violated: {err}");
        }
    }

    #[cfg(not(feature = "validate"))]
    fn debug_validate(&self) {}
}

impl<T: Clone> Default for Rtv<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Rtv<T> {
    fn clone(&self) -> Self {
        Rtv {
            root: self.root.clone(),
            shift: self.shift,
            root_size: self.root_size,
            tail: self.tail.clone(),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Rtv<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Rtv<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rtv[")?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<T: Clone + PartialEq> PartialEq for Rtv<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.values().eq(other.values())
    }
}

impl<T: Clone + Eq> Eq for Rtv<T> {}

impl<T: Clone + PartialOrd> PartialOrd for Rtv<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.values().partial_cmp(other.values())
    }
}

impl<T: Clone + Ord> Ord for Rtv<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values().cmp(other.values())
    }
}

impl<T: Clone + Hash> Hash for Rtv<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for value in self.values() {
            value.hash(state);
        }
    }
}

#[cfg(feature = "serde")]
impl<T: Clone + serde::Serialize> serde::Serialize for Rtv<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.size()))?;
        for value in self.values() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Clone + serde::Deserialize<'de>> serde::Deserialize<'de> for Rtv<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(Rtv::from_iterator(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rtv_from(range: std::ops::Range<i32>) -> Rtv<i32> {
        let mut v = Rtv::new();
        for i in range {
            v.push(i);
        }
        v
    }

    #[test]
    fn empty_has_zero_size() {
        let v: Rtv<i32> = Rtv::new();
        assert_eq!(v.size(), 0);
        assert!(v.is_empty());
    }

    #[test]
    fn get_within_tail() {
        let v = rtv_from(0..10);
        assert_eq!(*v.get(0), 0);
        assert_eq!(*v.get(9), 9);
        assert_eq!(v.maybe_get(10), None);
    }

    #[test]
    fn depth_growth_and_index_crossing() {
        let mut v: Rtv<i32> = Rtv::new();
        for i in 0..1025 {
            v.push(i);
        }
        assert_eq!(v.size(), 1025);
        assert_eq!(*v.get(0), 0);
        assert_eq!(*v.get(31), 31);
        assert_eq!(*v.get(32), 32);
        assert_eq!(*v.get(1024), 1024);

        // One more push should cross 1025 elements without corrupting
        // earlier indices.
        v.push(1025);
        assert_eq!(v.size(), 1026);
        assert_eq!(*v.get(1025), 1025);
    }

    #[test]
    fn root_becomes_internal_at_64_not_33() {
        let mut v: Rtv<i32> = Rtv::new();
        for i in 0..32 {
            v.push(i);
        }
        assert_eq!(v.shift_for_test(), 0);
        v.push(32);
        assert_eq!(v.shift_for_test(), 0, "33rd push must not grow depth yet");
        for i in 33..64 {
            v.push(i);
        }
        assert_eq!(v.shift_for_test(), 5, "64th push promotes the second leaf, growing depth");
    }

    #[test]
    fn shift_reaches_ten_at_1056_not_1025() {
        let mut v: Rtv<i32> = Rtv::new();
        for i in 0..1055 {
            v.push(i);
        }
        assert_eq!(v.shift_for_test(), 5);
        v.push(1055);
        assert_eq!(v.shift_for_test(), 10);
    }

    #[test]
    fn structural_sharing_on_clone() {
        let mut v = rtv_from(0..100);
        let w = v.clone();
        v.set(0, 999);
        assert_eq!(*v.get(0), 999);
        assert_eq!(*w.get(0), 0);
        for i in 1..100 {
            assert_eq!(v.get(i), w.get(i));
        }
    }

    #[test]
    fn snapshot_iterator_is_immune_to_later_pushes() {
        let mut v = rtv_from(0..50);
        let it = v.values();
        v.push(100);
        let drained: Vec<i32> = it.collect();
        assert_eq!(drained, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn push_then_pop_restores_state() {
        let mut v = rtv_from(0..40);
        let before = v.clone();
        v.push(999);
        let popped = v.pop();
        assert_eq!(popped, 999);
        assert_eq!(v, before);
    }

    #[test]
    fn pop_collapses_shift_back_down() {
        let mut v: Rtv<i32> = Rtv::new();
        for i in 0..2000 {
            v.push(i);
        }
        while v.size() > 33 {
            v.pop();
        }
        assert_eq!(v.shift_for_test(), 5);
        assert_eq!(*v.get(0), 0);
        assert_eq!(*v.get(32), 32);
        v.pop();
        assert_eq!(v.shift_for_test(), 0);
    }

    #[test]
    fn round_trip_via_from_sequence() {
        let source: Vec<i32> = (0..500).collect();
        let v = rtv_from(0..500);
        let w = Rtv::from_sequence(source);
        assert_eq!(v, w);
    }

    #[test]
    fn from_sequence_panics_when_len_lies() {
        struct Dishonest {
            remaining: usize,
            advertised: usize,
        }

        impl Iterator for Dishonest {
            type Item = i32;

            fn next(&mut self) -> Option<i32> {
                if self.remaining == 0 {
                    return None;
                }
                self.remaining -= 1;
                Some(0)
            }
        }

        impl ExactSizeIterator for Dishonest {
            fn len(&self) -> usize {
                self.advertised
            }
        }

        let seq = Dishonest {
            remaining: 3,
            advertised: 5,
        };
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| Rtv::from_sequence(seq)));
        assert!(result.is_err());
    }

    #[test]
    fn validate_exercises_count_across_internal_levels() {
        let v = rtv_from(0..2000);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn out_of_bounds_do_not_corrupt_state() {
        let mut v = rtv_from(0..10);
        assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| v.get(10))).is_err());
        assert_eq!(v.maybe_get(10), None);
        assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| v.set(10, 0))).is_err());
        assert_eq!(v.size(), 10);
        assert_eq!(v.values().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());

        let mut empty: Rtv<i32> = Rtv::new();
        assert_eq!(empty.maybe_pop(), None);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut v = rtv_from(0..5);
        v.resize(8, -1);
        assert_eq!(v.values().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, -1, -1, -1]);
        v.resize(3, -1);
        assert_eq!(v.values().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    impl<T: Clone> Rtv<T> {
        fn shift_for_test(&self) -> u32 {
            self.shift
        }
    }

    proptest! {
        #[test]
        fn matches_vec_under_push_set_pop(ops in prop::collection::vec(0i32..1000, 0..500)) {
            let mut v: Rtv<i32> = Rtv::new();
            let mut reference: Vec<i32> = Vec::new();
            for (i, op) in ops.iter().enumerate() {
                if op % 7 == 0 && !reference.is_empty() {
                    v.pop();
                    reference.pop();
                } else if op % 5 == 0 && !reference.is_empty() {
                    let idx = (*op as usize) % reference.len();
                    v.set(idx, *op);
                    reference[idx] = *op;
                } else {
                    v.push(*op);
                    reference.push(*op);
                }
                prop_assert_eq!(v.size(), reference.len());
                prop_assert_eq!(v.values().collect::<Vec<_>>(), reference.clone());
                let _ = i;
            }
        }

        #[test]
        fn clone_is_independent(values in prop::collection::vec(0i32..1000, 0..200)) {
            let mut v: Rtv<i32> = Rtv::from_iterator(values.clone());
            let w = v.clone();
            if !values.is_empty() {
                v.set(0, -1);
                v.push(-2);
            }
            prop_assert_eq!(w.values().collect::<Vec<_>>(), values);
        }
    }
}
