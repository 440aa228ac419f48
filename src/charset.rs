//! Fixed-width alphanumeric tokens.
//!
//! Both generators draw from the same alphabet so that attack and control
//! keys are indistinguishable to anything but the hash function.

pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of distinct tokens of `width` characters, or `None` if it does
/// not fit in a u64.
pub fn token_space(width: usize) -> Option<u64> {
    let width = u32::try_from(width).ok()?;
    (ALPHABET.len() as u64).checked_pow(width)
}

/// Write `index` as a big-endian base-62 token of exactly `width` bytes.
///
/// Returns false, leaving `out` untouched, when `index` needs more than
/// `width` digits.
pub fn write_token(index: u64, width: usize, out: &mut Vec<u8>) -> bool {
    if token_space(width).is_some_and(|space| index >= space) {
        return false;
    }

    let start = out.len();
    out.resize(start + width, ALPHABET[0]);
    let base = ALPHABET.len() as u64;
    let mut n = index;
    let mut pos = start + width;
    // Build from right to left
    while n > 0 {
        pos -= 1;
        out[pos] = ALPHABET[(n % base) as usize];
        n /= base;
    }
    true
}

pub fn token(index: u64, width: usize) -> Option<String> {
    let mut buf = Vec::with_capacity(width);
    if !write_token(index, width, &mut buf) {
        return None;
    }
    // The alphabet is ASCII
    String::from_utf8(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_padding() {
        assert_eq!(token(0, 4).unwrap(), "0000");
        assert_eq!(token(61, 4).unwrap(), "000z");
        assert_eq!(token(62, 4).unwrap(), "0010");
    }

    #[test]
    fn test_token_overflow() {
        assert_eq!(token_space(2), Some(62 * 62));
        assert!(token(62 * 62 - 1, 2).is_some());
        assert!(token(62 * 62, 2).is_none());
        assert!(token(1, 0).is_none());
        assert_eq!(token(0, 0).unwrap(), "");
    }

    #[test]
    fn test_write_token_appends() {
        let mut buf = b"ab".to_vec();
        assert!(write_token(63, 3, &mut buf));
        assert_eq!(buf, b"ab011");
        assert!(!write_token(1_000_000, 2, &mut buf));
        assert_eq!(buf, b"ab011");
    }

    #[test]
    fn test_huge_width_has_no_space_limit() {
        assert_eq!(token_space(64), None);
        assert_eq!(token(u64::MAX, 64).unwrap().len(), 64);
    }
}
