//! Minimal column covers over a 0/1 incidence matrix.
//!
//! Given rows of equal-length `0`/`1` strings, finds either one smallest
//! column cover or all minimal column covers: essential-column detection,
//! row reduction, dominance reduction to a fixed point, and a Petrick-style
//! product-of-sums to sum-of-products expansion for whatever rows remain.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::error::{QmError, QmResult};

/// The result of a minimal-column-cover query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCoverResult {
    /// `smallest = true`: a single smallest cover, as sorted column indices.
    Smallest(Vec<usize>),
    /// `smallest = false`: every minimal cover, each as sorted column indices.
    All(Vec<Vec<usize>>),
}

fn parse_row(row: &str, expected_len: usize, row_index: usize) -> QmResult<BTreeSet<usize>> {
    let mut ones = BTreeSet::new();
    let mut len = 0;
    for (col, ch) in row.chars().enumerate() {
        len += 1;
        match ch {
            '1' => {
                ones.insert(col);
            }
            '0' => {}
            other => {
                return Err(QmError::MalformedCube { bits: row.to_string(), position: col, found: other })
            }
        }
    }
    if len != expected_len {
        return Err(QmError::RaggedMatrix { expected: expected_len, found: len, row: row_index });
    }
    Ok(ones)
}

/// Find essential columns: a column is essential iff some row's sole `1` is
/// there. Returns the essentials and the rows NOT covered by any essential
/// (i.e. the reduced problem).
fn essential_columns(rows: &[BTreeSet<usize>]) -> (BTreeSet<usize>, Vec<BTreeSet<usize>>) {
    let mut essentials = BTreeSet::new();
    for row in rows {
        if row.len() == 1 {
            essentials.insert(*row.iter().next().unwrap());
        }
    }
    let remaining: Vec<BTreeSet<usize>> = rows
        .iter()
        .filter(|row| row.is_disjoint(&essentials))
        .cloned()
        .collect();
    (essentials, remaining)
}

/// Dominance reduction to a fixed point: dedup rows, then drop any row that
/// is a strict or equal superset of some other distinct row (the dominating
/// row is redundant since covering the dominated row covers it too).
fn reduce_by_dominance(rows: Vec<BTreeSet<usize>>) -> Vec<BTreeSet<usize>> {
    let mut current = rows;
    loop {
        let mut deduped: Vec<BTreeSet<usize>> = Vec::new();
        for row in &current {
            if !deduped.contains(row) {
                deduped.push(row.clone());
            }
        }
        let kept: Vec<BTreeSet<usize>> = deduped
            .iter()
            .filter(|row| {
                !deduped
                    .iter()
                    .any(|other| other != *row && other.is_subset(row))
            })
            .cloned()
            .collect();
        if kept.len() == current.len() && kept == current {
            return kept;
        }
        current = kept;
    }
}

/// Absorb `z` into `terms`: drop `z` if some existing term is a subset of
/// it (z is redundant); otherwise drop any existing term that is a superset
/// of `z` and append `z`. Mirrors keep-the-minimal-term absorption.
fn absorb(terms: &mut Vec<BTreeSet<usize>>, z: BTreeSet<usize>) {
    for q in terms.iter() {
        if q.is_subset(&z) {
            return;
        }
    }
    terms.retain(|q| !z.is_subset(q));
    terms.push(z);
}

/// Distribute a product of sums (each clause is the set of columns with a
/// `1` in some row) into a sum of products, keeping only subsumption-minimal
/// terms. Returns `(terms, completed)`; `completed` is `false` only when a
/// deadline cut the expansion short.
fn cnf_to_dnf(clauses: &[BTreeSet<usize>], deadline: Option<Instant>) -> (Vec<BTreeSet<usize>>, bool) {
    let mut terms: Vec<BTreeSet<usize>> = Vec::new();
    let mut first = true;
    for clause in clauses {
        if !first {
            if let Some(dl) = deadline {
                if Instant::now() >= dl {
                    return (terms, false);
                }
            }
        }
        if first {
            first = false;
            for &col in clause {
                let mut s = BTreeSet::new();
                s.insert(col);
                terms.push(s);
            }
            continue;
        }
        let mut next = Vec::new();
        for &col in clause {
            for y in &terms {
                let mut z = y.clone();
                z.insert(col);
                absorb(&mut next, z);
            }
        }
        terms = next;
    }
    (terms, true)
}

/// Find minimal column covers of the incidence matrix `rows` (equal-length
/// `0`/`1` strings). `deadline` bounds the Petrick expansion and only
/// applies when `smallest = true`.
pub fn minimal_column_covers(
    rows: &[&str],
    smallest: bool,
    deadline: Option<Instant>,
) -> QmResult<ColumnCoverResult> {
    if rows.is_empty() {
        return Ok(if smallest {
            ColumnCoverResult::Smallest(Vec::new())
        } else {
            ColumnCoverResult::All(vec![Vec::new()])
        });
    }
    let width = rows[0].chars().count();
    let parsed: Vec<BTreeSet<usize>> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| parse_row(r, width, i))
        .collect::<QmResult<_>>()?;

    let (essentials, remaining) = essential_columns(&parsed);
    let reduced = reduce_by_dominance(remaining);

    if reduced.is_empty() {
        let cover: Vec<usize> = essentials.into_iter().collect();
        return Ok(if smallest {
            ColumnCoverResult::Smallest(cover)
        } else {
            ColumnCoverResult::All(vec![cover])
        });
    }

    let (mut terms, _completed) = cnf_to_dnf(&reduced, if smallest { deadline } else { None });
    terms.sort_by_key(|t| t.len());

    if smallest {
        let shortest = terms.into_iter().next().unwrap_or_default();
        let mut cover: Vec<usize> = essentials.into_iter().collect();
        for col in shortest {
            if !cover.contains(&col) {
                cover.push(col);
            }
        }
        cover.sort_unstable();
        Ok(ColumnCoverResult::Smallest(cover))
    } else {
        let all: Vec<Vec<usize>> = terms
            .into_iter()
            .map(|term| {
                let mut cover: BTreeSet<usize> = essentials.clone();
                cover.extend(term);
                cover.into_iter().collect::<Vec<_>>()
            })
            .collect();
        Ok(ColumnCoverResult::All(all))
    }
}
