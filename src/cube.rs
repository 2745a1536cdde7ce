//! Ternary bit-string cubes over `{0, 1, -}` and their algebra.

use std::fmt;
use std::marker::PhantomData;

use crate::encoding::{BitOps, MintermEncoding};
use crate::error::{QmError, QmResult};

/// A fixed-width ternary cube: a value mask and a dash mask over the same
/// integer type. `dash` bit *i* set means position *i* is `-`; otherwise
/// `bits` bit *i* holds the literal's value. Constructors normalize the
/// invariant `bits & !dash == bits` so dash positions never carry a stray
/// value bit, which keeps `Eq`/`Hash` agreeing with bit-string equality.
#[derive(Clone, Copy, Eq)]
pub struct Cube<E: MintermEncoding> {
    width: usize,
    bits: E::Value,
    dash: E::Value,
    _enc: PhantomData<E>,
}

impl<E: MintermEncoding> PartialEq for Cube<E> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.bits == other.bits && self.dash == other.dash
    }
}

impl<E: MintermEncoding> std::hash::Hash for Cube<E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.bits.hash(state);
        self.dash.hash(state);
    }
}

impl<E: MintermEncoding> fmt::Debug for Cube<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube({})", self)
    }
}

impl<E: MintermEncoding> Cube<E> {
    fn normalize(bits: E::Value, dash: E::Value) -> (E::Value, E::Value) {
        (bits & !dash, dash)
    }

    /// Build a cube directly from a value mask and dash mask.
    pub fn from_masks(width: usize, bits: E::Value, dash: E::Value) -> Self {
        let (bits, dash) = Self::normalize(bits, dash);
        Cube { width, bits, dash, _enc: PhantomData }
    }

    /// The all-dash cube of the given width: matches every minterm.
    pub fn universe(width: usize) -> Self {
        let mut dash = E::Value::zero();
        for i in 0..width {
            dash = dash.set_bit(i);
        }
        Cube::from_masks(width, E::Value::zero(), dash)
    }

    /// A fully specified cube (no dashes) from a minterm value.
    pub fn from_minterm(width: usize, minterm: E::Value) -> Self {
        Cube::from_masks(width, minterm, E::Value::zero())
    }

    /// Parse a bit-string over `{0, 1, -}`. Character `i` (left to right)
    /// is position `i`, matching the `variables[i] ↔ bit position i`
    /// convention used throughout [`crate::cover::Cover`] so that a cube
    /// parsed alongside a variable list reads left-to-right in variable
    /// order.
    pub fn parse(s: &str) -> QmResult<Self> {
        let width = s.chars().count();
        let mut bits = E::Value::zero();
        let mut dash = E::Value::zero();
        for (i, ch) in s.chars().enumerate() {
            let pos = i;
            match ch {
                '0' => {}
                '1' => bits = bits.set_bit(pos),
                '-' => dash = dash.set_bit(pos),
                other => {
                    return Err(QmError::MalformedCube {
                        bits: s.to_string(),
                        position: i,
                        found: other,
                    })
                }
            }
        }
        Ok(Cube::from_masks(width, bits, dash))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn bits_mask(&self) -> E::Value {
        self.bits
    }

    pub fn dash_mask(&self) -> E::Value {
        self.dash
    }

    /// Number of `1` bits (does not include dashes).
    pub fn count_ones(&self) -> u32 {
        self.bits.count_ones()
    }

    /// `true` if position `pos` is a dash.
    pub fn is_dash(&self, pos: usize) -> bool {
        self.dash.get_bit(pos)
    }

    /// The literal value at `pos`: `None` for a dash.
    pub fn get(&self, pos: usize) -> Option<bool> {
        if self.is_dash(pos) {
            None
        } else {
            Some(self.bits.get_bit(pos))
        }
    }

    /// Return a copy with position `pos` set to `value`.
    pub fn with_bit(&self, pos: usize, value: Option<bool>) -> Self {
        let (bits, dash) = match value {
            None => (self.bits, self.dash.set_bit(pos)),
            Some(true) => (self.bits.set_bit(pos), self.dash.clear_bit(pos)),
            Some(false) => (self.bits.clear_bit(pos), self.dash.clear_bit(pos)),
        };
        Cube::from_masks(self.width, bits, dash)
    }

    fn require_same_width(&self, other: &Self) -> QmResult<()> {
        if self.width != other.width {
            Err(QmError::WidthMismatch { expected: self.width, found: other.width })
        } else {
            Ok(())
        }
    }

    /// Count of positions where both cubes are non-dash and differ.
    pub fn distance(&self, other: &Self) -> QmResult<u32> {
        self.require_same_width(other)?;
        let both_specified = !self.dash & !other.dash;
        let differ = self.bits ^ other.bits;
        Ok((differ & both_specified).count_ones())
    }

    /// `true` iff `distance == 1` and the dash patterns are identical.
    pub fn can_merge(&self, other: &Self) -> QmResult<bool> {
        let dist = self.distance(other)?;
        Ok(dist == 1 && self.dash == other.dash)
    }

    /// Merge two mergeable cubes: the unique differing position becomes a
    /// dash, all other positions are kept. `None` if not mergeable.
    pub fn merge(&self, other: &Self) -> QmResult<Option<Self>> {
        if !self.can_merge(other)? {
            return Ok(None);
        }
        let differ = self.bits ^ other.bits;
        let new_dash = self.dash | differ;
        Ok(Some(Cube::from_masks(self.width, self.bits & !differ, new_dash)))
    }

    /// Consensus of two cubes at Hamming distance 1, or `None` if undefined.
    pub fn consensus(&self, other: &Self) -> QmResult<Option<Self>> {
        if self.distance(other)? != 1 {
            return Ok(None);
        }
        let differ_specified = (self.bits ^ other.bits) & !self.dash & !other.dash;
        // Dash only where both operands are dash, or at the genuinely
        // differing position; where exactly one operand is dash, the other's
        // specified value is taken (not turned into a dash).
        let new_dash = (self.dash & other.dash) | differ_specified;
        let new_bits = (self.bits | other.bits) & !new_dash;
        Ok(Some(Cube::from_masks(self.width, new_bits, new_dash)))
    }

    /// `a \ b`: cubes whose minterm set is `minterms(a)` minus `minterms(b)`.
    /// Deduplicated.
    pub fn sharp(&self, other: &Self) -> QmResult<Vec<Self>> {
        self.require_same_width(other)?;
        let mut out = Vec::new();
        for pos in 0..self.width {
            if other.is_dash(pos) {
                continue;
            }
            let b_val = other.get(pos).unwrap();
            match self.get(pos) {
                Some(a_val) if a_val == b_val => continue,
                _ => {
                    let flipped = self.with_bit(pos, Some(!b_val));
                    if !out.contains(&flipped) {
                        out.push(flipped);
                    }
                }
            }
        }
        Ok(out)
    }

    /// `true` iff there is no position where both are non-dash and differ.
    pub fn intersects(&self, other: &Self) -> QmResult<bool> {
        Ok(self.distance(other)? == 0)
    }

    /// Elementwise intersection; `None` if the cubes disagree at some
    /// non-dash position.
    pub fn intersect(&self, other: &Self) -> QmResult<Option<Self>> {
        if !self.intersects(other)? {
            return Ok(None);
        }
        let new_dash = self.dash & other.dash;
        let new_bits = (self.bits | other.bits) & !new_dash;
        Ok(Some(Cube::from_masks(self.width, new_bits, new_dash)))
    }

    /// Enumerate all `2^k` minterms obtained by substituting the `k` dash
    /// positions with `0`/`1`, dash positions ordered least-significant
    /// position first (little-endian over position index).
    pub fn each_minterm(&self) -> Vec<E::Value> {
        let mut dash_positions = Vec::new();
        for pos in 0..self.width {
            if self.is_dash(pos) {
                dash_positions.push(pos);
            }
        }
        let k = dash_positions.len();
        // `k` can reach 64 for a fully-dashed `Enc64` cube; `1u64 << k` would
        // overflow there, so the selector walks `u128` instead (valid up to
        // `k == 127`, safely covering every encoding's `MAX_VARS`).
        let mut out = Vec::with_capacity(1usize << k.min(20));
        for selector in 0u128..(1u128 << k) {
            let mut value = self.bits;
            for (i, &pos) in dash_positions.iter().enumerate() {
                if (selector >> i) & 1 == 1 {
                    value = value.set_bit(pos);
                }
            }
            out.push(value);
        }
        out
    }
}

impl<E: MintermEncoding> fmt::Display for Cube<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.width {
            let c = if self.is_dash(i) {
                '-'
            } else if self.bits.get_bit(i) {
                '1'
            } else {
                '0'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Enc16;

    type C = Cube<Enc16>;

    #[test]
    fn parse_roundtrips_through_display() {
        let c: C = Cube::parse("10-1").unwrap();
        assert_eq!(c.to_string(), "10-1");
        assert_eq!(c.width(), 4);
    }

    #[test]
    fn parse_rejects_bad_char() {
        let err = Cube::<Enc16>::parse("10x1").unwrap_err();
        assert!(matches!(err, QmError::MalformedCube { .. }));
    }

    #[test]
    fn distance_counts_specified_differences_only() {
        let a: C = Cube::parse("1-0").unwrap();
        let b: C = Cube::parse("1-1").unwrap();
        assert_eq!(a.distance(&b).unwrap(), 1);
        let c: C = Cube::parse("0-0").unwrap();
        assert_eq!(a.distance(&c).unwrap(), 1);
    }

    #[test]
    fn can_merge_requires_identical_dash_pattern() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("11").unwrap();
        assert!(a.can_merge(&b).unwrap());
        let c: C = Cube::parse("1-").unwrap();
        assert!(!a.can_merge(&c).unwrap());
    }

    #[test]
    fn merge_dashes_the_differing_position() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("11").unwrap();
        let merged = a.merge(&b).unwrap().unwrap();
        assert_eq!(merged.to_string(), "1-");
    }

    #[test]
    fn merge_none_when_dash_patterns_differ() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("1-").unwrap();
        assert_eq!(a.merge(&b).unwrap(), None);
    }

    #[test]
    fn consensus_matches_merge_at_differing_position() {
        let a: C = Cube::parse("1-0").unwrap();
        let b: C = Cube::parse("0-0").unwrap();
        let cons = a.consensus(&b).unwrap().unwrap();
        assert_eq!(cons.to_string(), "--0");
    }

    #[test]
    fn consensus_takes_the_other_value_when_only_one_side_is_dash() {
        let a: C = Cube::parse("10-").unwrap();
        let b: C = Cube::parse("000").unwrap();
        let cons = a.consensus(&b).unwrap().unwrap();
        // Position 0 differs (1 vs 0) -> dash. Position 2 is a's dash vs
        // b's 0 -> take b's 0, not a dash.
        assert_eq!(cons.to_string(), "-00");
    }

    #[test]
    fn sharp_removes_covered_minterms() {
        let a: C = Cube::parse("1-").unwrap();
        let b: C = Cube::parse("10").unwrap();
        let diff = a.sharp(&b).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].to_string(), "11");
    }

    #[test]
    fn sharp_is_empty_when_a_is_subset_of_b() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("1-").unwrap();
        assert!(a.sharp(&b).unwrap().is_empty());
    }

    #[test]
    fn intersect_elementwise() {
        let a: C = Cube::parse("1-0").unwrap();
        let b: C = Cube::parse("-10").unwrap();
        let i = a.intersect(&b).unwrap().unwrap();
        assert_eq!(i.to_string(), "110");
    }

    #[test]
    fn intersect_none_on_conflict() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("11").unwrap();
        assert_eq!(a.intersect(&b).unwrap(), None);
    }

    #[test]
    fn each_minterm_enumerates_all_substitutions() {
        let c: C = Cube::parse("1-0").unwrap();
        let ms = c.each_minterm();
        assert_eq!(ms.len(), 2);
        let strings: Vec<String> = ms
            .iter()
            .map(|&m| Cube::<Enc16>::from_minterm(3, m).to_string())
            .collect();
        assert!(strings.contains(&"100".to_string()));
        assert!(strings.contains(&"110".to_string()));
    }

    #[test]
    fn each_minterm_handles_a_wide_enc64_cube_without_overflow() {
        use crate::encoding::Enc64;
        // 64-wide cube with 10 dashes: exercises the Enc64 path of
        // `each_minterm` at a dash count well beyond what `u32`/`u64`
        // selector arithmetic would still handle safely.
        let mut cube: Cube<Enc64> = Cube::from_minterm(64, 0);
        for pos in 0..10 {
            cube = cube.with_bit(pos, None);
        }
        let minterms = cube.each_minterm();
        assert_eq!(minterms.len(), 1 << 10);
    }

    #[test]
    fn each_minterm_selector_shift_does_not_overflow_at_the_max_dash_count() {
        // Regression guard for the `Enc64` ceiling (`MAX_VARS == 64`): a
        // fully-dashed 64-wide cube has `k == 64` dash positions, and the
        // selector range `0..(1 << k)` must be constructible (even though
        // materializing all 2^64 minterms is infeasible and not attempted
        // here) without the shift itself overflowing.
        let universe: Cube<crate::encoding::Enc64> = Cube::universe(64);
        let k = universe.dash_mask().count_ones();
        assert_eq!(k, 64);
        assert_eq!(1u128.checked_shl(k), Some(1u128 << 64));
    }

    #[test]
    fn width_mismatch_is_an_error() {
        let a: C = Cube::parse("10").unwrap();
        let b: C = Cube::parse("100").unwrap();
        assert!(matches!(a.distance(&b), Err(QmError::WidthMismatch { .. })));
    }
}
