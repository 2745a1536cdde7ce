//! Implicant: a cube plus the derived fields the Quine-McCluskey merge pass
//! needs to keep in sync — dash pattern (for bucketing), ones-count (for the
//! monotone merge-order pruning), covered minterms, and primality.

use std::collections::BTreeSet;

use crate::cube::Cube;
use crate::encoding::{BitOps, MintermEncoding};

/// A cube produced during prime-implicant generation, together with the
/// minterms it dominates. Whether an implicant is itself prime is determined
/// by the merge pass (a generator that survives every merge attempt), not
/// carried as a field here.
#[derive(Clone, Debug)]
pub struct Implicant<E: MintermEncoding> {
    pub cube: Cube<E>,
    pub count: u32,
    pub covers: BTreeSet<E::Value>,
}

impl<E: MintermEncoding> Implicant<E> {
    /// An implicant wrapping a single minterm: no dashes, `count` is the
    /// minterm's popcount, `covers` is the singleton set containing it.
    pub fn from_minterm(width: usize, minterm: E::Value) -> Self {
        let cube = Cube::from_minterm(width, minterm);
        let mut covers = BTreeSet::new();
        covers.insert(minterm);
        Implicant { cube, count: cube.count_ones(), covers }
    }

    /// Mask: dash bit `i` set iff the underlying cube's bit `i` is a dash.
    /// Two implicants can merge only if their masks are identical.
    pub fn mask(&self) -> E::Value {
        self.cube.dash_mask()
    }

    /// Attempt to merge `self` with `other`; the returned implicant's
    /// `covers` is the union of the parents'.
    pub fn try_merge(&self, other: &Self) -> crate::error::QmResult<Option<Self>> {
        match self.cube.merge(&other.cube)? {
            None => Ok(None),
            Some(merged) => {
                let mut covers = self.covers.clone();
                covers.extend(other.covers.iter().copied());
                Ok(Some(Implicant { cube: merged, count: merged.count_ones(), covers }))
            }
        }
    }
}
