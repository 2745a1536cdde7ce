//! Random minterm/cube generation for property tests and benchmarks.

use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::encoding::{BitOps, MintermEncoding};

fn random_in_range<E: MintermEncoding>(rng: &mut StdRng, n_variables: usize) -> E::Value {
    let mut v = E::Value::zero();
    for pos in 0..n_variables {
        if rng.random_bool(0.5) {
            v = v.set_bit(pos);
        }
    }
    v
}

/// Generate `n_minterms` unique random minterms over `n_variables`
/// variables, sorted ascending, reproducible from `seed`.
///
/// # Panics
/// Panics if `n_variables` exceeds `E::MAX_VARS`, is zero, or if
/// `n_minterms` exceeds the number of distinct minterms available
/// (`2^n_variables`).
pub fn generate_random_minterms<E: MintermEncoding>(n_variables: usize, n_minterms: usize, seed: u64) -> Vec<E::Value> {
    assert!(n_variables > 0, "number of variables must be positive");
    assert!(
        n_variables <= E::MAX_VARS,
        "number of variables ({}) exceeds encoding capacity (max {})",
        n_variables,
        E::MAX_VARS
    );
    if let Some(universe_size) = 1usize.checked_shl(n_variables as u32) {
        assert!(
            n_minterms <= universe_size,
            "n_minterms ({}) exceeds the {} distinct minterms available",
            n_minterms,
            universe_size
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut minterms = HashSet::new();
    while minterms.len() < n_minterms {
        minterms.insert(random_in_range::<E>(&mut rng, n_variables));
    }
    let mut result: Vec<E::Value> = minterms.into_iter().collect();
    result.sort_unstable();
    result
}
