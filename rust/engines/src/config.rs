use crate::{EngineError, Result};

/// Shallowest supported lookahead
pub const MIN_DEPTH: u8 = 3;
/// Deepest supported lookahead
pub const MAX_DEPTH: u8 = 5;
pub const DEFAULT_DEPTH: u8 = MIN_DEPTH;

/// Knobs for [`crate::LookaheadEvaluator`].
///
/// - `depth`: plies expanded below each candidate move, `MIN_DEPTH..=MAX_DEPTH`.
/// - `parallel`: expand sibling subtrees on the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadConfig {
    pub depth: u8,
    pub parallel: bool,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: true,
        }
    }
}

impl LookaheadConfig {
    /// Parallel configuration with the given depth, validated
    pub fn new(depth: u8) -> Result<Self> {
        let config = Self {
            depth,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Same configuration, expanded on the calling thread only
    pub fn sequential(self) -> Self {
        Self {
            parallel: false,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            return Err(EngineError::InvalidDepthConfig {
                depth: self.depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}
