//! The djb family of string hashes.
//!
//! Each variant starts from a fixed seed and folds every input byte into a
//! 32-bit accumulator with `acc = combine(acc * multiplier, byte)`, wrapping
//! mod 2^32.

use std::fmt;
use std::str::FromStr;

use crate::error::HashDosError;

/// Output of a djb hash.
pub type HashValue = u32;

/// A djb-style hash as implemented by the victim's map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DjbVariant {
    /// Seed 5381, times 33, XOR.
    #[default]
    Djbx33x,
    /// Seed 5381, times 33, add.
    Djbx33a,
    /// Seed 0, times 31, add (`java.lang.String#hashCode`).
    Djbx31a,
}

impl DjbVariant {
    pub const ALL: [DjbVariant; 3] = [Self::Djbx33x, Self::Djbx33a, Self::Djbx31a];

    pub fn seed(self) -> HashValue {
        match self {
            Self::Djbx33x | Self::Djbx33a => 5381,
            Self::Djbx31a => 0,
        }
    }

    pub fn multiplier(self) -> HashValue {
        match self {
            Self::Djbx33x | Self::Djbx33a => 33,
            Self::Djbx31a => 31,
        }
    }

    /// Fold a single byte into the accumulator.
    #[inline]
    pub fn step(self, acc: HashValue, byte: u8) -> HashValue {
        let scaled = acc.wrapping_mul(self.multiplier());
        match self {
            Self::Djbx33x => scaled ^ byte as u32,
            Self::Djbx33a | Self::Djbx31a => scaled.wrapping_add(byte as u32),
        }
    }

    /// Continue hashing `input` from an intermediate accumulator.
    #[inline]
    pub fn hash_from(self, state: HashValue, input: &[u8]) -> HashValue {
        input.iter().fold(state, |acc, &b| self.step(acc, b))
    }

    pub fn hash(self, input: &[u8]) -> HashValue {
        self.hash_from(self.seed(), input)
    }

    pub fn hash_str(self, input: &str) -> HashValue {
        self.hash(input.as_bytes())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Djbx33x => "djbx33x",
            Self::Djbx33a => "djbx33a",
            Self::Djbx31a => "djbx31a",
        }
    }
}

impl fmt::Display for DjbVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DjbVariant {
    type Err = HashDosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HashDosError::config(format!("unknown hash variant '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_seed() {
        for variant in DjbVariant::ALL {
            assert_eq!(variant.hash(b""), variant.seed());
        }
    }

    #[test]
    fn test_djbx33x_known_values() {
        // 5381 * 33 ^ 'a'
        assert_eq!(DjbVariant::Djbx33x.hash(b"a"), (5381u32 * 33) ^ 0x61);
        let expected = ((5381u32 * 33) ^ 0x61).wrapping_mul(33) ^ 0x62;
        assert_eq!(DjbVariant::Djbx33x.hash(b"ab"), expected);
    }

    #[test]
    fn test_djbx33a_matches_djb2() {
        // Classic djb2 written with shifts.
        let djb2 = |input: &[u8]| {
            input.iter().fold(5381u32, |h, &c| {
                h.wrapping_shl(5).wrapping_add(h).wrapping_add(c as u32)
            })
        };
        for input in ["", "OpenProcess", "RegCreateKeyExW", "attr0"] {
            assert_eq!(DjbVariant::Djbx33a.hash_str(input), djb2(input.as_bytes()));
        }
        assert_eq!(DjbVariant::Djbx33a.hash_str("OpenProcess"), 0x7136fdd6);
    }

    #[test]
    fn test_djbx31a_matches_java_hash_code() {
        assert_eq!(DjbVariant::Djbx31a.hash_str("hello") as i32, 99162322);
        // The textbook Java collision.
        assert_eq!(
            DjbVariant::Djbx31a.hash_str("Aa"),
            DjbVariant::Djbx31a.hash_str("BB")
        );
    }

    #[test]
    fn test_wrapping_on_long_input() {
        let long = "x".repeat(10_000);
        // Must not panic on overflow in debug builds.
        let _ = DjbVariant::Djbx33x.hash_str(&long);
    }

    #[test]
    fn test_hash_from_is_incremental() {
        let v = DjbVariant::Djbx33x;
        let mid = v.hash(b"hello ");
        assert_eq!(v.hash_from(mid, b"world"), v.hash(b"hello world"));
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!("DJBX33X".parse::<DjbVariant>().unwrap(), DjbVariant::Djbx33x);
        assert_eq!("djbx31a".parse::<DjbVariant>().unwrap(), DjbVariant::Djbx31a);
        assert!("fnv1a".parse::<DjbVariant>().is_err());
    }
}
