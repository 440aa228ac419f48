//! Multicollision generation for djb hashes.
//!
//! A key is a concatenation of `k` fixed-length blocks. For block position
//! `i` the seed chain holds two distinct blocks that hash to the same
//! accumulator when started from the chaining state left by positions
//! `0..i`. Since both choices at every position end in the same state, all
//! `2^k` block combinations share one final hash.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::charset;
use crate::error::{HashDosError, Result};
use crate::hash::{DjbVariant, HashValue};
use crate::MAX_COUNT;

/// Characters per block.
pub const BLOCK_LEN: usize = 4;

/// Blocks needed to address `MAX_COUNT` keys.
pub const CHAIN_LEN: usize = 27;

static CHAINS: [OnceCell<SeedChain>; 3] = [OnceCell::new(), OnceCell::new(), OnceCell::new()];

/// Number of blocks per key when generating `count` keys.
pub fn block_count(count: usize) -> usize {
    match count {
        0 => 0,
        1 => 1,
        n => (usize::BITS - (n - 1).leading_zeros()) as usize,
    }
}

/// Length in bytes of every key generated for `count`.
pub fn key_len(count: usize) -> usize {
    block_count(count) * BLOCK_LEN
}

/// Colliding block pairs for one hash variant, one pair per position.
#[derive(Debug)]
pub struct SeedChain {
    variant: DjbVariant,
    pairs: Vec<[String; 2]>,
    /// `states[i]` is the accumulator after `i` blocks.
    states: Vec<HashValue>,
}

impl SeedChain {
    /// Search a chain of `len` positions for `variant`.
    pub fn derive(variant: DjbVariant, len: usize) -> Result<Self> {
        let mut pairs = Vec::with_capacity(len);
        let mut states = Vec::with_capacity(len + 1);
        let mut state = variant.seed();
        states.push(state);

        for position in 0..len {
            let (s0, s1, next) = find_block_pair(variant, state).ok_or_else(|| {
                HashDosError::generation(format!(
                    "no colliding {BLOCK_LEN}-byte block pair for {variant} at position {position}"
                ))
            })?;
            pairs.push([s0, s1]);
            state = next;
            states.push(state);
        }

        debug!(%variant, positions = len, "derived seed chain");
        Ok(Self {
            variant,
            pairs,
            states,
        })
    }

    pub fn variant(&self) -> DjbVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The two interchangeable blocks at `position`.
    pub fn pair(&self, position: usize) -> Option<(&str, &str)> {
        self.pairs
            .get(position)
            .map(|[s0, s1]| (s0.as_str(), s1.as_str()))
    }

    /// Hash shared by every key built from the first `blocks` positions.
    pub fn state_after(&self, blocks: usize) -> Option<HashValue> {
        self.states.get(blocks).copied()
    }

    /// Key for bit-vector `pattern` over the first `blocks` positions, most
    /// significant bit first.
    fn write_key(&self, pattern: usize, blocks: usize, out: &mut String) {
        for position in 0..blocks {
            let bit = (pattern >> (blocks - 1 - position)) & 1;
            out.push_str(&self.pairs[position][bit]);
        }
    }
}

/// First pair of distinct `BLOCK_LEN` tokens colliding from `state`, in
/// token order, with the state they both reach.
fn find_block_pair(variant: DjbVariant, state: HashValue) -> Option<(String, String, HashValue)> {
    let space = charset::token_space(BLOCK_LEN)?;
    let mut seen: HashMap<HashValue, u64> = HashMap::new();
    let mut buf = Vec::with_capacity(BLOCK_LEN);

    for index in 0..space {
        buf.clear();
        charset::write_token(index, BLOCK_LEN, &mut buf);
        let h = variant.hash_from(state, &buf);
        match seen.entry(h) {
            Entry::Occupied(earlier) => {
                let s0 = charset::token(*earlier.get(), BLOCK_LEN)?;
                let s1 = charset::token(index, BLOCK_LEN)?;
                return Some((s0, s1, h));
            }
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }
    None
}

/// The process-wide seed chain for `variant`, derived on first use.
pub fn seed_chain(variant: DjbVariant) -> Result<&'static SeedChain> {
    let cell = match variant {
        DjbVariant::Djbx33x => &CHAINS[0],
        DjbVariant::Djbx33a => &CHAINS[1],
        DjbVariant::Djbx31a => &CHAINS[2],
    };
    cell.get_or_try_init(|| SeedChain::derive(variant, CHAIN_LEN))
}

/// Produces keys that all land in the same bucket.
#[derive(Debug, Clone, Copy)]
pub struct CollisionGenerator {
    variant: DjbVariant,
    max_count: usize,
}

impl CollisionGenerator {
    pub fn new(variant: DjbVariant, max_count: usize) -> Self {
        Self {
            variant,
            max_count: max_count.min(MAX_COUNT),
        }
    }

    pub fn variant(&self) -> DjbVariant {
        self.variant
    }

    /// Generate `count` distinct keys sharing one hash value.
    pub fn generate(&self, count: usize) -> Result<Vec<String>> {
        check_count(count, self.max_count)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let chain = seed_chain(self.variant)?;
        let blocks = block_count(count);
        let mut keys = Vec::with_capacity(count);
        for pattern in 0..count {
            let mut key = String::with_capacity(blocks * BLOCK_LEN);
            chain.write_key(pattern, blocks, &mut key);
            keys.push(key);
        }
        Ok(keys)
    }

    /// The hash every key of `generate(count)` shares, `None` for zero keys.
    pub fn collision_hash(&self, count: usize) -> Result<Option<HashValue>> {
        check_count(count, self.max_count)?;
        if count == 0 {
            return Ok(None);
        }
        Ok(seed_chain(self.variant)?.state_after(block_count(count)))
    }
}

pub(crate) fn check_count(count: usize, max_count: usize) -> Result<()> {
    if count > max_count {
        return Err(HashDosError::config(format!(
            "count {count} exceeds the maximum of {max_count}"
        )));
    }
    Ok(())
}
