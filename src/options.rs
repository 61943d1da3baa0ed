use crate::error::{Error, Result};

/// Default number of levels a skip list may use.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// Default chance that a node is promoted one level higher.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Hard ceiling on `max_level`. 2^64 nodes would be needed to fill it.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Construction-time configuration. Fixed for the lifetime of the map.
///
/// ```
/// use skipmap::Options;
///
/// let opts = Options { max_level: 12, probability: 0.25, ..Options::default() };
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Number of levels available, including level 0. Must be in `1..=64`.
    pub max_level: usize,
    /// Per-level promotion probability. Must be in `(0, 1)`.
    ///
    /// 1/2 gives ~2 forward links per node. LevelDB uses 1/4, which
    /// trades a slightly longer search for less memory.
    pub probability: f64,
    /// Seed for level assignment. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Options {
    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL_LIMIT {
            return Err(Error::InvalidOptions(format!(
                "max_level must be in 1..={MAX_LEVEL_LIMIT}, got {}",
                self.max_level
            )));
        }
        // Written as a negated range check so NaN is rejected too.
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidOptions(format!(
                "probability must be in (0, 1), got {}",
                self.probability
            )));
        }
        Ok(())
    }
}
