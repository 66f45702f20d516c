//! Leaf and Internal nodes of the tree proper.
//!
//! Nodes are immutable after construction: every mutating operation takes
//! `&self` and returns a fresh `Rc<Node<T>>` with at most one child per level
//! replaced (path copy), so a node may be shared by any number of `Rtv`s,
//! clones and snapshot iterators without synchronisation.

use std::rc::Rc;

use super::slot::Slot;

pub(crate) const BRANCH_FACTOR: usize = 32;
pub(crate) const BITS: u32 = 5;
pub(crate) const MASK: usize = BRANCH_FACTOR - 1;

type Children<T> = Box<[Option<Rc<Node<T>>>; BRANCH_FACTOR]>;
type Leaves<T> = Box<[Slot<T>; BRANCH_FACTOR]>;

pub(crate) enum Node<T> {
    Leaf(Leaves<T>),
    Internal(Children<T>),
}

fn empty_children<T>() -> Children<T> {
    // `Default` is implemented for arrays of `Option<_>` up to length 32,
    // which is exactly our branch factor.
    Box::new(Default::default())
}

fn empty_leaves<T>() -> Leaves<T> {
    Box::new(std::array::from_fn(|_| Slot::uninitialized()))
}

impl<T: Clone> Node<T> {
    /// Builds a brand-new leaf out of a full tail buffer's slots.
    pub(crate) fn leaf_from_slots(slots: &[Slot<T>; BRANCH_FACTOR]) -> Self {
        let mut leaves = empty_leaves::<T>();
        for (dst, src) in leaves.iter_mut().zip(slots.iter()) {
            *dst = src.clone();
        }
        Node::Leaf(leaves)
    }

    /// Borrows the raw slots of a Leaf. Panics if called on an Internal —
    /// only `popTail`'s caller (the `Rtv` facade) uses this, on the leaf it
    /// just detached.
    pub(crate) fn leaf_slots(&self) -> &[Slot<T>; BRANCH_FACTOR] {
        match self {
            Node::Leaf(slots) => slots,
            Node::Internal(_) => unreachable!("leaf_slots called on an Internal node"),
        }
    }

    /// Number of live elements reachable from this node. Children pack
    /// left-dense, so an `Internal` stops summing at the first absent
    /// child rather than walking the whole array.
    pub(crate) fn count(&self) -> usize {
        match self {
            Node::Leaf(_) => BRANCH_FACTOR,
            Node::Internal(children) => children
                .iter()
                .take_while(|c| c.is_some())
                .map(|c| c.as_ref().unwrap().count())
                .sum(),
        }
    }

    /// Descends to the element at `index`, given the shift at this level.
    /// `index < count` is a precondition the caller (the `Rtv` facade)
    /// guarantees; an out-of-range index here is a programmer error.
    pub(crate) fn get(&self, shift: u32, index: usize) -> &T {
        match self {
            Node::Leaf(slots) => slots[index & MASK].get(),
            Node::Internal(children) => {
                let child_idx = (index >> shift) & MASK;
                children[child_idx]
                    .as_ref()
                    .expect("descended into a missing child")
                    .get(shift - BITS, index)
            }
        }
    }

    /// Path-copy update: clones the array at each level along the spine,
    /// reusing every untouched sibling.
    pub(crate) fn set(&self, shift: u32, index: usize, value: Rc<T>) -> Rc<Node<T>> {
        match self {
            Node::Leaf(slots) => {
                let mut new_slots = slots.clone();
                new_slots[index & MASK] = Slot::from_shared(value);
                Rc::new(Node::Leaf(new_slots))
            }
            Node::Internal(children) => {
                let child_idx = (index >> shift) & MASK;
                let mut new_children = children.clone();
                let child = children[child_idx]
                    .as_ref()
                    .expect("descended into a missing child");
                new_children[child_idx] = Some(child.set(shift - BITS, index, value));
                Rc::new(Node::Internal(new_children))
            }
        }
    }

    /// Attaches `tail_leaf` as the new rightmost leaf. Must be called at a
    /// shift such that the tree already has room (the `Rtv` facade is
    /// responsible for growing depth first).
    pub(crate) fn push_tail(
        &self,
        shift: u32,
        root_index: usize,
        tail_leaf: &Rc<Node<T>>,
    ) -> Rc<Node<T>> {
        let children = match self {
            Node::Internal(children) => children,
            Node::Leaf(_) => unreachable!("push_tail descended into a leaf"),
        };
        let child_idx = (root_index >> shift) & MASK;
        let mut new_children = children.clone();
        let inserted = if shift == BITS {
            Rc::clone(tail_leaf)
        } else {
            match &children[child_idx] {
                Some(child) => child.push_tail(shift - BITS, root_index, tail_leaf),
                None => Node::branch_ladder(shift - BITS, tail_leaf),
            }
        };
        new_children[child_idx] = Some(inserted);
        Rc::new(Node::Internal(new_children))
    }

    /// A chain of single-child Internals terminating in `tail_leaf`, used
    /// when `pushTail` needs to grow into a branch that does not exist yet.
    pub(crate) fn branch_ladder(shift: u32, tail_leaf: &Rc<Node<T>>) -> Rc<Node<T>> {
        if shift == 0 {
            Rc::clone(tail_leaf)
        } else {
            let mut children = empty_children::<T>();
            children[0] = Some(Node::branch_ladder(shift - BITS, tail_leaf));
            Rc::new(Node::Internal(children))
        }
    }

    /// Detaches the rightmost leaf, returning the (possibly absent) new root
    /// and the detached leaf. `new_root_index` is the index of the last
    /// element that will remain in the tree after this pop.
    pub(crate) fn pop_tail(
        &self,
        shift: u32,
        new_root_index: usize,
    ) -> (Option<Rc<Node<T>>>, Rc<Node<T>>) {
        let children = match self {
            Node::Internal(children) => children,
            Node::Leaf(_) => unreachable!("pop_tail descended into a leaf"),
        };
        let child_idx = (new_root_index >> shift) & MASK;
        if shift == BITS {
            let leaf = children[child_idx]
                .clone()
                .expect("pop_tail found a missing leaf child");
            if child_idx == 0 {
                (None, leaf)
            } else {
                let mut new_children = children.clone();
                new_children[child_idx] = None;
                (Some(Rc::new(Node::Internal(new_children))), leaf)
            }
        } else {
            let child = children[child_idx]
                .as_ref()
                .expect("pop_tail descended into a missing child");
            let (new_child, leaf) = child.pop_tail(shift - BITS, new_root_index);
            if new_child.is_none() && child_idx == 0 {
                (None, leaf)
            } else {
                let mut new_children = children.clone();
                new_children[child_idx] = new_child;
                (Some(Rc::new(Node::Internal(new_children))), leaf)
            }
        }
    }

    /// Child 0 of an Internal, used by `popTail`'s caller to flatten the
    /// tree one level once the new `rootSize` fits in a shallower capacity.
    pub(crate) fn first_child(&self) -> Rc<Node<T>> {
        match self {
            Node::Internal(children) => {
                children[0].clone().expect("internal node missing child 0")
            }
            Node::Leaf(_) => unreachable!("first_child called on a Leaf"),
        }
    }

    /// Recursive structural audit: confirms leaves only appear at shift
    /// zero, internals only above it, children pack left-dense with no
    /// gaps, and reachable element counts add up to `expected_size`. Only
    /// ever called when the `validate` feature is enabled, so it costs
    /// nothing in a default build.
    pub(crate) fn validate(
        &self,
        shift: u32,
        expected_size: usize,
    ) -> Result<(), super::error::ValidateError> {
        use super::error::ValidateError;

        match self {
            Node::Leaf(_) => {
                if shift != 0 {
                    return Err(ValidateError::LeafAtNonZeroShift { shift });
                }
                if expected_size != BRANCH_FACTOR {
                    return Err(ValidateError::SizeMismatch {
                        expected: expected_size,
                        actual: BRANCH_FACTOR,
                    });
                }
                Ok(())
            }
            Node::Internal(children) => {
                if shift == 0 {
                    return Err(ValidateError::InternalAtZeroShift);
                }
                let child_capacity = BRANCH_FACTOR << (shift - BITS);
                let mut total = 0usize;
                let mut seen_absent = false;
                for child in children.iter() {
                    match child {
                        Some(node) => {
                            if seen_absent {
                                return Err(ValidateError::GapInChildren);
                            }
                            let remaining = expected_size - total;
                            let this_size = remaining.min(child_capacity);
                            let actual = node.count();
                            if actual != this_size {
                                return Err(ValidateError::SizeMismatch {
                                    expected: this_size,
                                    actual,
                                });
                            }
                            node.validate(shift - BITS, this_size)?;
                            total += this_size;
                        }
                        None => seen_absent = true,
                    }
                }
                if total != expected_size {
                    return Err(ValidateError::SizeMismatch {
                        expected: expected_size,
                        actual: total,
                    });
                }
                Ok(())
            }
        }
    }
}
