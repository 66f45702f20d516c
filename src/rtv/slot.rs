//! The raw storage primitive shared by leaves and the tail buffer.
//!
//! A slot is either uninitialised or holds a reference-counted element. Using
//! `Rc<T>` rather than `T` directly means path-copying a leaf or the tail only
//! ever bumps refcounts, never clones an element of arbitrary size — the same
//! cost profile the source technique gets for free from a garbage-collected
//! host, where array slots are always object references.

use std::rc::Rc;

pub(crate) struct Slot<T> {
    value: Option<Rc<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn uninitialized() -> Self {
        Slot { value: None }
    }

    pub(crate) fn make(value: T) -> Self {
        Slot {
            value: Some(Rc::new(value)),
        }
    }

    pub(crate) fn from_shared(value: Rc<T>) -> Self {
        Slot { value: Some(value) }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrows the live element. Panics if the slot is uninitialised — this
    /// is always a caller bug (reading past `tailSize`/`rootSize`), never a
    /// reachable user-facing condition.
    pub(crate) fn get(&self) -> &T {
        self.value
            .as_deref()
            .expect("read of an uninitialised slot")
    }

    pub(crate) fn get_shared(&self) -> Rc<T> {
        self.value.clone().expect("read of an uninitialised slot")
    }

    pub(crate) fn clear(&mut self) {
        self.value = None;
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot {
            value: self.value.clone(),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::uninitialized()
    }
}
