//! Quine-McCluskey prime-implicant generation and the orchestration that
//! turns a set of on-set minterms into a minimized sum-of-products `Expr`.

pub mod implicant;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

pub use implicant::Implicant;

use crate::column_cover::{minimal_column_covers, ColumnCoverResult};
use crate::encoding::{BitOps, Enc16, Enc32, Enc64, MintermEncoding};
use crate::error::{QmError, QmResult};
use crate::expr::{BooleanFunction, Expr};

/// Iteratively merge implicants bucketed by dash mask until no merge
/// occurs, collecting every implicant that survives a pass unmerged
/// (i.e. every prime implicant).
fn find_prime_implicants<E: MintermEncoding>(
    width: usize,
    terms: &BTreeSet<E::Value>,
) -> QmResult<Vec<Implicant<E>>> {
    let mut current: BTreeMap<E::Value, Vec<Implicant<E>>> = BTreeMap::new();
    for &m in terms {
        let im = Implicant::<E>::from_minterm(width, m);
        current.entry(im.mask()).or_default().push(im);
    }
    for group in current.values_mut() {
        group.sort_by_key(|im| im.count);
    }

    let mut generators: Vec<Implicant<E>> = Vec::new();

    loop {
        let mut next: BTreeMap<E::Value, Vec<Implicant<E>>> = BTreeMap::new();
        let mut any_merge = false;

        for group in current.values() {
            let mut used = vec![false; group.len()];
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    if group[j].count > group[i].count + 1 {
                        break;
                    }
                    if let Some(merged) = group[i].try_merge(&group[j])? {
                        used[i] = true;
                        used[j] = true;
                        any_merge = true;
                        let bucket = next.entry(merged.mask()).or_default();
                        match bucket.iter_mut().find(|x: &&mut Implicant<E>| x.cube == merged.cube) {
                            Some(existing) => existing.covers.extend(merged.covers.iter().copied()),
                            None => bucket.push(merged),
                        }
                    }
                }
            }
            for (idx, im) in group.iter().enumerate() {
                if !used[idx] {
                    generators.push(im.clone());
                }
            }
        }

        if !any_merge {
            break;
        }
        for group in next.values_mut() {
            group.sort_by_key(|im| im.count);
        }
        current = next;
    }

    Ok(generators)
}

/// Emit the selected generators as a sum-of-products `Expr`, sorted by
/// bit-string for deterministic output.
fn emit<E: MintermEncoding>(variables: &[String], generators: &[Implicant<E>], selected: &[usize]) -> Expr {
    let mut chosen: Vec<&Implicant<E>> = selected.iter().map(|&i| &generators[i]).collect();
    chosen.sort_by(|a, b| a.cube.to_string().cmp(&b.cube.to_string()));

    let terms: Vec<Expr> = chosen
        .into_iter()
        .map(|im| {
            let literals: Vec<Expr> = variables
                .iter()
                .enumerate()
                .filter_map(|(pos, name)| match im.cube.get(pos) {
                    Some(true) => Some(Expr::var(name.clone())),
                    Some(false) => Some(Expr::not(Expr::var(name.clone()))),
                    None => None,
                })
                .collect();
            Expr::and(literals)
        })
        .collect();
    Expr::or(terms)
}

/// Minimize a function given as on-set minterms (plus don't-cares, which
/// participate in merging but never in the cover matrix) over `variables`.
/// `deadline` bounds the Petrick expansion in the minimal-cover step.
pub fn minimize<E: MintermEncoding>(
    variables: &[String],
    minterms: &[E::Value],
    dont_cares: &[E::Value],
    deadline: Option<Instant>,
) -> QmResult<Expr> {
    let width = variables.len();
    if minterms.is_empty() {
        return Ok(Expr::False);
    }

    let on_set: BTreeSet<E::Value> = minterms.iter().copied().collect();
    let mut all_terms = on_set.clone();
    all_terms.extend(dont_cares.iter().copied());

    let generators = find_prime_implicants::<E>(width, &all_terms)?;

    let distinct_minterms: Vec<E::Value> = on_set.iter().copied().collect();
    let rows: Vec<String> = distinct_minterms
        .iter()
        .map(|m| {
            generators
                .iter()
                .map(|g| if g.covers.contains(m) { '1' } else { '0' })
                .collect::<String>()
        })
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();

    let selected = match minimal_column_covers(&row_refs, true, deadline)? {
        ColumnCoverResult::Smallest(cols) => cols,
        ColumnCoverResult::All(_) => unreachable!("smallest=true always returns Smallest"),
    };

    if selected.is_empty() {
        return Ok(Expr::False);
    }

    if selected.len() == 1 {
        let g = &generators[selected[0]];
        if g.cube.dash_mask().count_ones() as usize == width {
            let universe_size: u128 = 1u128 << width as u32;
            if g.covers.len() as u128 == universe_size {
                return Ok(Expr::True);
            }
        }
    }

    Ok(emit(variables, &generators, &selected))
}

fn to_values<E: MintermEncoding>(assignments: &[Vec<bool>]) -> Vec<E::Value> {
    assignments
        .iter()
        .map(|bits| {
            let mut v = E::Value::zero();
            for (i, &b) in bits.iter().enumerate() {
                if b {
                    v = v.set_bit(i);
                }
            }
            v
        })
        .collect()
}

/// Minimize a Boolean function supplied through the `BooleanFunction`
/// collaborator boundary, dispatching to the narrowest encoding (`Enc16`,
/// `Enc32`, `Enc64`) that fits its variable count.
pub fn minimize_boolean_function<F: BooleanFunction>(f: &F, deadline: Option<Instant>) -> QmResult<Expr> {
    let variables = f.get_variables();
    if variables.is_empty() {
        return Ok(if f.each_minterm().is_empty() { Expr::False } else { Expr::True });
    }
    let n = variables.len();
    let assignments = f.each_minterm();

    if n <= Enc16::MAX_VARS {
        minimize::<Enc16>(&variables, &to_values::<Enc16>(&assignments), &[], deadline)
    } else if n <= Enc32::MAX_VARS {
        minimize::<Enc32>(&variables, &to_values::<Enc32>(&assignments), &[], deadline)
    } else if n <= Enc64::MAX_VARS {
        minimize::<Enc64>(&variables, &to_values::<Enc64>(&assignments), &[], deadline)
    } else {
        Err(QmError::TooManyVariables { n_variables: n, max_vars: Enc64::MAX_VARS })
    }
}

/// Convenience wrapper over an `Expr` tree: short-circuits a literally
/// constant input, otherwise minimizes via `minimize_boolean_function`.
pub fn minimize_expr(expr: &Expr) -> QmResult<Expr> {
    match expr {
        Expr::True => Ok(Expr::True),
        Expr::False => Ok(Expr::False),
        other => minimize_boolean_function(other, None),
    }
}
