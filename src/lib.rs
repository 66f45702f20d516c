//! A persistent, bit-partitioned radix-tree vector with O(1)
//! structural-sharing clone, modelled on the Clojure/`im`-style persistent
//! vector technique.
//!
//! See [`Rtv`] for the main entry point and [`Frozen`] for the read-only
//! snapshot type returned by [`Rtv::freeze`].

pub mod rtv;

#[cfg(feature = "proptest")]
pub use rtv::arbitrary;
pub use rtv::{Frozen, Items, Keys, Rtv, ValidateError, Values};
