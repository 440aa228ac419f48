//! Baseline keys with no shared buckets.

use std::collections::HashSet;

use tracing::trace;

use crate::charset;
use crate::collision::{check_count, key_len};
use crate::error::{HashDosError, Result};
use crate::hash::{DjbVariant, HashValue};
use crate::MAX_COUNT;

/// Produces keys of the same length as [`crate::CollisionGenerator`] output
/// whose hash values are pairwise distinct.
#[derive(Debug, Clone, Copy)]
pub struct ControlSetGenerator {
    variant: DjbVariant,
    max_count: usize,
}

impl ControlSetGenerator {
    pub fn new(variant: DjbVariant, max_count: usize) -> Self {
        Self {
            variant,
            max_count: max_count.min(MAX_COUNT),
        }
    }

    pub fn variant(&self) -> DjbVariant {
        self.variant
    }

    /// Generate `count` distinct keys with distinct hash values.
    ///
    /// Key `i` is the next base-62 candidate token, zero-padded to the
    /// collision key length; a candidate whose hash was already taken is
    /// skipped.
    pub fn generate(&self, count: usize) -> Result<Vec<String>> {
        check_count(count, self.max_count)?;
        let width = key_len(count);
        let mut keys = Vec::with_capacity(count);
        let mut taken: HashSet<HashValue> = HashSet::with_capacity(count);
        let mut buf = Vec::with_capacity(width);
        let mut candidate = 0u64;

        while keys.len() < count {
            buf.clear();
            if !charset::write_token(candidate, width, &mut buf) {
                return Err(HashDosError::generation(format!(
                    "control token space of width {width} exhausted after {} keys",
                    keys.len()
                )));
            }
            let h = self.variant.hash(&buf);
            if taken.insert(h) {
                keys.push(String::from_utf8_lossy(&buf).into_owned());
            } else {
                trace!(candidate, hash = h, "skipping colliding control candidate");
            }
            candidate += 1;
        }
        Ok(keys)
    }
}
