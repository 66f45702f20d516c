//! The tail: the rightmost 0..B elements not yet promoted into the tree.
//!
//! The tail is the only place ordinary (non-copy-on-write) mutation happens;
//! everything reachable through `root` is immutable once built.

use std::rc::Rc;

use super::node::BRANCH_FACTOR;
use super::slot::Slot;

pub(crate) struct Tail<T> {
    slots: Box<[Slot<T>; BRANCH_FACTOR]>,
    len: usize,
}

impl<T: Clone> Tail<T> {
    pub(crate) fn new() -> Self {
        Tail {
            slots: Box::new(std::array::from_fn(|_| Slot::uninitialized())),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == BRANCH_FACTOR
    }

    pub(crate) fn get(&self, offset: usize) -> &T {
        debug_assert!(offset < self.len);
        self.slots[offset].get()
    }

    pub(crate) fn get_shared(&self, offset: usize) -> Rc<T> {
        debug_assert!(offset < self.len);
        self.slots[offset].get_shared()
    }

    pub(crate) fn set(&mut self, offset: usize, value: Rc<T>) {
        debug_assert!(offset < self.len);
        self.slots[offset] = Slot::from_shared(value);
    }

    pub(crate) fn push(&mut self, value: Rc<T>) {
        debug_assert!(!self.is_full());
        self.slots[self.len] = Slot::from_shared(value);
        self.len += 1;
    }

    /// Removes and returns the last live slot's element.
    pub(crate) fn pop(&mut self) -> Rc<T> {
        debug_assert!(self.len > 0);
        self.len -= 1;
        let value = self.slots[self.len].get_shared();
        self.slots[self.len].clear();
        value
    }

    /// Resets the tail to a single element — used after `popTail` retrieves
    /// the rightmost leaf and demotes its last slot back into the tail.
    pub(crate) fn reset_from_leaf(&mut self, slots: &[Slot<T>; BRANCH_FACTOR]) {
        for (dst, src) in self.slots.iter_mut().zip(slots.iter()) {
            *dst = src.clone();
        }
        self.len = BRANCH_FACTOR - 1;
        self.slots[BRANCH_FACTOR - 1].clear();
    }

    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
        self.len = 0;
    }

    pub(crate) fn slots(&self) -> &[Slot<T>; BRANCH_FACTOR] {
        &self.slots
    }
}

impl<T: Clone> Clone for Tail<T> {
    fn clone(&self) -> Self {
        let mut slots: Box<[Slot<T>; BRANCH_FACTOR]> =
            Box::new(std::array::from_fn(|_| Slot::uninitialized()));
        for (dst, src) in slots.iter_mut().zip(self.slots.iter()) {
            *dst = src.clone();
        }
        Tail {
            slots,
            len: self.len,
        }
    }
}
