//! `Frozen<T>`: the result of [`crate::Rtv::freeze`].
//!
//! Structurally identical to `Rtv<T>` — same root/shift/root_size/tail,
//! same O(1) construction cost — but its type carries no mutating methods,
//! so a caller cannot accidentally grow or shrink a snapshot they meant to
//! hand out read-only.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::iter::{Items, Keys, Values};
use super::node::Node;
use super::tail::Tail;

pub struct Frozen<T> {
    pub(crate) root: Option<Rc<Node<T>>>,
    pub(crate) shift: u32,
    pub(crate) root_size: usize,
    pub(crate) tail: Tail<T>,
}

impl<T: Clone> Frozen<T> {
    pub fn size(&self) -> usize {
        self.root_size + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get(&self, index: usize) -> &T {
        self.maybe_get_ref(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for Frozen of size {}", self.size()))
    }

    pub fn maybe_get(&self, index: usize) -> Option<T> {
        self.maybe_get_ref(index).cloned()
    }

    fn maybe_get_ref(&self, index: usize) -> Option<&T> {
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

    pub fn keys(&self) -> Keys {
        Keys::new(self.size())
    }

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
}

impl<T: Clone> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Frozen {
            root: self.root.clone(),
            shift: self.shift,
            root_size: self.root_size,
            tail: self.tail.clone(),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frozen[")?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<T: Clone + PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.values().eq(other.values())
    }
}

impl<T: Clone + Eq> Eq for Frozen<T> {}

impl<T: Clone + PartialOrd> PartialOrd for Frozen<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.values().partial_cmp(other.values())
    }
}

impl<T: Clone + Ord> Ord for Frozen<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values().cmp(other.values())
    }
}

impl<T: Clone + Hash> Hash for Frozen<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for value in self.values() {
            value.hash(state);
        }
    }
}
