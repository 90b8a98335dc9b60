pub mod level;
pub mod skiplist;

pub use skiplist::{LevelIter, OrderedIndex};

/// Number of levels used when none is configured.
pub const DEFAULT_MAX_LEVEL: usize = 8;

/// Promotion probability used when none is configured.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Shape of an [`OrderedIndex`].
///
/// - `max_level`: number of linked levels `L`. Node heights are capped at `L`.
/// - `probability`: chance `p` that a new node is promoted one level higher.
///
/// Expected search cost is about `log_{1/p}(n) / p` steps while
/// `n <= (1/p)^L`; past that the top level gets crowded and cost degrades
/// towards linear. Pick `L` accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub max_level: usize,
    pub probability: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
        }
    }
}

impl Options {
    pub fn new(max_level: usize, probability: f64) -> Self {
        Options {
            max_level,
            probability,
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Check the construction preconditions.
    ///
    /// # Panics
    /// Panics if `max_level` is 0 or `probability` is not in (0, 1).
    pub fn validate(&self) {
        assert!(self.max_level >= 1, "max_level must be >= 1");
        assert!(
            self.probability > 0.0 && self.probability < 1.0,
            "probability must be in (0, 1)"
        );
    }
}
