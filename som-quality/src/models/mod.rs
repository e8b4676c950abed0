//! Contains a minimal model of a trained map consumed by quality measures: a grid of units with
//! their weight vectors and mapped inputs, input data and distance metrics.

mod input;
pub use self::input::*;

mod layer;
pub use self::layer::*;

mod metric;
pub use self::metric::*;
