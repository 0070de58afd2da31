// Value models: cross-sectional normalization of the remaining pool,
// replacement-level surplus (VORP), and value-over-next-available (VONA).

pub mod normalize;
pub mod replacement;
pub mod vona;

pub use normalize::{normalized_value, CategoryStats, PoolStats};
pub use replacement::{surplus_value, ReplacementLevels};
pub use vona::{PositionBoard, RankedPlayer};
