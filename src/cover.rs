//! Covers: ordered collections of cubes over a shared variable list.

use std::fmt;

use crate::column_cover::{minimal_column_covers, ColumnCoverResult};
use crate::cube::Cube;
use crate::encoding::{BitOps, MintermEncoding};
use crate::error::{QmError, QmResult};

/// An ordered list of cubes over a shared, ordered variable list. Duplicates
/// are allowed until [`Cover::uniq`] is invoked; cube order is deterministic
/// but not semantically significant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cover<E: MintermEncoding> {
    pub variables: Vec<String>,
    pub cubes: Vec<Cube<E>>,
}

impl<E: MintermEncoding> Cover<E> {
    pub fn new(variables: Vec<String>) -> Self {
        Cover { variables, cubes: Vec::new() }
    }

    pub fn from_cubes(variables: Vec<String>, cubes: Vec<Cube<E>>) -> QmResult<Self> {
        for cube in &cubes {
            if cube.width() != variables.len() {
                return Err(QmError::WidthMismatch { expected: variables.len(), found: cube.width() });
            }
        }
        Ok(Cover { variables, cubes })
    }

    pub fn width(&self) -> usize {
        self.variables.len()
    }

    pub fn push(&mut self, cube: Cube<E>) -> QmResult<()> {
        if cube.width() != self.width() {
            return Err(QmError::WidthMismatch { expected: self.width(), found: cube.width() });
        }
        self.cubes.push(cube);
        Ok(())
    }

    /// Remove duplicate cubes, preserving first-seen order.
    pub fn uniq(&mut self) {
        let mut seen: Vec<Cube<E>> = Vec::new();
        self.cubes.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
    }

    /// Set union. Duplicates are preserved until `uniq` is invoked.
    pub fn unite(&self, other: &Self) -> QmResult<Self> {
        if self.variables != other.variables {
            return Err(QmError::WidthMismatch { expected: self.width(), found: other.width() });
        }
        let mut cubes = self.cubes.clone();
        cubes.extend(other.cubes.iter().copied());
        Ok(Cover { variables: self.variables.clone(), cubes })
    }

    /// Set difference: drops any cube of `self` that is byte-equal to a
    /// cube of `other`.
    pub fn subtract(&self, other: &Self) -> QmResult<Self> {
        if self.variables != other.variables {
            return Err(QmError::WidthMismatch { expected: self.width(), found: other.width() });
        }
        let cubes: Vec<Cube<E>> = self.cubes.iter().filter(|c| !other.cubes.contains(c)).copied().collect();
        Ok(Cover { variables: self.variables.clone(), cubes })
    }

    /// `variables[i]`'s bit position is `i` itself — the same indexing a
    /// cube's own textual form uses, so a cube parsed alongside this
    /// variable list reads left-to-right in variable order.
    fn var_position(&self, var: &str) -> QmResult<usize> {
        self.variables
            .iter()
            .position(|v| v == var)
            .ok_or_else(|| QmError::WidthMismatch { expected: self.width(), found: 0 })
    }

    /// Cofactor with respect to `var = val`. For each cube: if its bit at
    /// `var`'s position equals `val`, dash it and keep; if it's the
    /// opposite non-dash value, drop it; if already a dash, keep unchanged.
    pub fn cofactor(&self, var: &str, val: bool) -> QmResult<Self> {
        let pos = self.var_position(var)?;
        self.cofactor_at(pos, val)
    }

    fn cofactor_at(&self, pos: usize, val: bool) -> QmResult<Self> {
        let mut cubes = Vec::new();
        for cube in &self.cubes {
            match cube.get(pos) {
                None => cubes.push(*cube),
                Some(v) if v == val => cubes.push(cube.with_bit(pos, None)),
                Some(_) => {}
            }
        }
        let mut cover = Cover { variables: self.variables.clone(), cubes };
        cover.uniq();
        Ok(cover)
    }

    /// Generalized Shannon cofactor with respect to a cube `c`: for each
    /// cube `s`, positions where `s[i] == c[i]` become dashes; `s` is
    /// dropped if it conflicts with `c` at some non-dash position.
    pub fn cofactor_cube(&self, c: &Cube<E>) -> QmResult<Self> {
        if c.width() != self.width() {
            return Err(QmError::WidthMismatch { expected: self.width(), found: c.width() });
        }
        let mut cubes = Vec::new();
        'cubes: for cube in &self.cubes {
            let mut result = *cube;
            for pos in 0..self.width() {
                match (cube.get(pos), c.get(pos)) {
                    (Some(a), Some(b)) if a == b => result = result.with_bit(pos, None),
                    (Some(a), Some(b)) if a != b => continue 'cubes,
                    _ => {}
                }
            }
            cubes.push(result);
        }
        let mut cover = Cover { variables: self.variables.clone(), cubes };
        cover.uniq();
        Ok(cover)
    }

    /// Walk cubes accumulating a merged dash signature; the first position
    /// where a `0` and a `1` have both been seen identifies a binate
    /// variable. `None` iff the cover is unate.
    pub fn find_binate(&self) -> Option<String> {
        let width = self.width();
        if width == 0 {
            return None;
        }
        // seen_zero/seen_one track whether a 0 or 1 has been observed at
        // each position across all cubes.
        let mut seen_zero = vec![false; width];
        let mut seen_one = vec![false; width];
        for cube in &self.cubes {
            for pos in 0..width {
                match cube.get(pos) {
                    Some(true) => seen_one[pos] = true,
                    Some(false) => seen_zero[pos] = true,
                    None => {}
                }
            }
        }
        for pos in 0..width {
            if seen_zero[pos] && seen_one[pos] {
                return Some(self.variables[pos].clone());
            }
        }
        None
    }

    /// `true` iff unate and the cover contains the all-dash cube, or (for a
    /// binate cover) both cofactors of a binate variable are tautologies.
    /// `false` for the empty cover.
    pub fn is_tautology(&self) -> QmResult<bool> {
        if self.cubes.is_empty() {
            return Ok(false);
        }
        match self.find_binate() {
            None => Ok(self.cubes.iter().any(|c| c.dash_mask().count_ones() as usize == self.width())),
            Some(var) => {
                let cf0 = self.cofactor(&var, false)?;
                let cf1 = self.cofactor(&var, true)?;
                Ok(cf0.is_tautology()? && cf1.is_tautology()?)
            }
        }
    }

    /// The complement cover: empty cover complements to the all-dash cube;
    /// a unate cover complements via minimal column covers over its
    /// cube/variable incidence matrix; a binate cover recurses on the
    /// Shannon cofactors of a binate variable.
    pub fn complement(&self) -> QmResult<Self> {
        if self.cubes.is_empty() {
            return Cover::from_cubes(self.variables.clone(), vec![Cube::universe(self.width())]);
        }
        match self.find_binate() {
            None => self.complement_unate(),
            Some(var) => {
                let pos = self.var_position(&var)?;
                let cf0 = self.cofactor(&var, false)?.complement()?;
                let cf1 = self.cofactor(&var, true)?.complement()?;
                let mut cubes = Vec::new();
                for q in &cf0.cubes {
                    if q.get(pos) != Some(true) {
                        cubes.push(q.with_bit(pos, Some(false)));
                    }
                }
                for q in &cf1.cubes {
                    if q.get(pos) != Some(false) {
                        cubes.push(q.with_bit(pos, Some(true)));
                    }
                }
                let mut cover = Cover { variables: self.variables.clone(), cubes };
                cover.uniq();
                Ok(cover)
            }
        }
    }

    fn complement_unate(&self) -> QmResult<Self> {
        let width = self.width();
        let rows: Vec<String> = self
            .cubes
            .iter()
            .map(|cube| {
                (0..width)
                    .map(|pos| if cube.is_dash(pos) { '0' } else { '1' })
                    .collect::<String>()
            })
            .collect();
        let row_refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
        let result = minimal_column_covers(&row_refs, false, None)?;
        let all = match result {
            ColumnCoverResult::All(all) => all,
            ColumnCoverResult::Smallest(one) => vec![one],
        };
        let mut cubes = Vec::new();
        for columns in all {
            let mut c = Cube::universe(width);
            for k in columns {
                let any_one = self.cubes.iter().any(|cube| cube.get(k) == Some(true));
                c = c.with_bit(k, Some(!any_one));
            }
            cubes.push(c);
        }
        let mut cover = Cover { variables: self.variables.clone(), cubes };
        cover.uniq();
        Ok(cover)
    }
}

impl<E: MintermEncoding> fmt::Display for Cover<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variables.join(","))?;
        for cube in &self.cubes {
            write!(f, ",{}", cube)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Enc16;

    fn cover(vars: &[&str], cubes: &[&str]) -> Cover<Enc16> {
        let cubes: Vec<Cube<Enc16>> = cubes.iter().map(|s| Cube::parse(s).unwrap()).collect();
        Cover::from_cubes(vars.iter().map(|s| s.to_string()).collect(), cubes).unwrap()
    }

    #[test]
    fn find_binate_identifies_a_mixed_column() {
        let c = cover(&["a", "b"], &["10", "11"]);
        assert_eq!(c.find_binate(), Some("b".to_string()));
    }

    #[test]
    fn unate_cover_has_no_binate_variable() {
        let c = cover(&["a", "b"], &["1-", "10"]);
        assert_eq!(c.find_binate(), None);
    }

    #[test]
    fn s6_tautology_true_with_complementary_single_literal_cubes() {
        let c = cover(&["a", "b", "c"], &["1--", "-1-", "--1", "000"]);
        assert!(c.is_tautology().unwrap());
    }

    #[test]
    fn s6_tautology_false_without_the_constant_zero_patch() {
        let c = cover(&["a", "b", "c"], &["1--", "-1-", "--1"]);
        assert!(!c.is_tautology().unwrap());
    }

    #[test]
    fn is_tautology_false_for_empty_cover() {
        let c: Cover<Enc16> = Cover::new(vec!["a".to_string()]);
        assert!(!c.is_tautology().unwrap());
    }

    #[test]
    fn cofactor_keeps_dashes_and_matching_bits_drops_opposite() {
        let c = cover(&["a", "b"], &["10", "01", "-1"]);
        let cf = c.cofactor("a", true).unwrap();
        // "10" -> "-0"; "01" dropped (a=0 != val); "-1" kept as-is.
        let strings: Vec<String> = cf.cubes.iter().map(|c| c.to_string()).collect();
        assert!(strings.contains(&"-0".to_string()));
        assert!(strings.contains(&"-1".to_string()));
        assert_eq!(strings.len(), 2);
    }

    #[test]
    fn cofactor_cube_generalizes_single_variable_cofactor() {
        // Cofactoring "1-0" with respect to "1-0" itself: every non-dash
        // position of the cube agrees, so every position of c becomes a dash.
        let c = cover(&["a", "b", "c"], &["1-0", "101"]);
        let pivot: Cube<Enc16> = Cube::parse("1-0").unwrap();
        let cf = c.cofactor_cube(&pivot).unwrap();
        let strings: Vec<String> = cf.cubes.iter().map(|c| c.to_string()).collect();
        // "1-0": a and c agree with the pivot at both non-dash positions,
        // becoming fully dashed; b was already a dash in both and stays so.
        assert!(strings.contains(&"---".to_string()));
        // "101": a agrees (dash in c), c=1 conflicts with the pivot's c=0,
        // so this cube is dropped entirely.
        assert_eq!(strings.len(), 1);
    }

    #[test]
    fn cofactor_cube_matches_single_variable_cofactor_for_a_minterm_pivot() {
        let c = cover(&["a", "b"], &["10", "01", "11"]);
        let pivot: Cube<Enc16> = Cube::parse("-1").unwrap();
        let cf_generalized = c.cofactor_cube(&pivot).unwrap();
        let cf_single = c.cofactor("b", true).unwrap();
        assert_eq!(cf_generalized, cf_single);
    }

    #[test]
    fn s5_complement_involution_by_truth_table() {
        let c = cover(&["a", "b", "c"], &["10-", "-01"]);
        let comp = c.complement().unwrap();
        let comp2 = comp.complement().unwrap();
        for m in 0u32..8 {
            let minterm: Cube<Enc16> = Cube::from_minterm(3, m);
            let in_c = c.cubes.iter().any(|cube| cube.intersects(&minterm).unwrap());
            let in_comp2 = comp2.cubes.iter().any(|cube| cube.intersects(&minterm).unwrap());
            assert_eq!(in_c, in_comp2, "minterm {:03b}", m);
        }
    }

    #[test]
    fn complement_and_original_union_to_tautology() {
        let c = cover(&["a", "b", "c"], &["10-", "-01"]);
        let comp = c.complement().unwrap();
        let combined = c.unite(&comp).unwrap();
        assert!(combined.is_tautology().unwrap());
    }

    #[test]
    fn complement_of_empty_cover_is_all_dash() {
        let c: Cover<Enc16> = Cover::new(vec!["a".to_string(), "b".to_string()]);
        let comp = c.complement().unwrap();
        assert_eq!(comp.cubes.len(), 1);
        assert_eq!(comp.cubes[0].to_string(), "--");
    }
}
