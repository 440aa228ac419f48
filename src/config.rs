//! Attack configuration.

use crate::error::{HashDosError, Result};
use crate::hash::DjbVariant;
use crate::payload::PlacementMode;
use crate::{DEFAULT_COUNT, MAX_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackConfig {
    /// Number of keys placed in each message.
    pub count: usize,
    pub placement: PlacementMode,
    pub variant: DjbVariant,
    /// Ceiling for `count`; may be lowered but never raised above
    /// [`MAX_COUNT`].
    pub max_count: usize,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            placement: PlacementMode::default(),
            variant: DjbVariant::default(),
            max_count: MAX_COUNT,
        }
    }
}

impl AttackConfig {
    pub fn new(count: usize, placement: PlacementMode) -> Self {
        Self {
            count,
            placement,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: DjbVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_count > MAX_COUNT {
            return Err(HashDosError::config(format!(
                "max_count {} exceeds the hard limit of {MAX_COUNT}",
                self.max_count
            )));
        }
        if self.count > self.max_count {
            return Err(HashDosError::config(format!(
                "count {} exceeds the maximum of {}",
                self.count, self.max_count
            )));
        }
        Ok(())
    }
}
