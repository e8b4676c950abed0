//! A collection of reusable algorithms used by quality measures: tie-aware ranking, shortest
//! paths over the unit lattice and over the graph induced by best matching units.

mod induced;
pub use self::induced::*;

mod lattice;
pub use self::lattice::*;

mod ranking;
pub use self::ranking::*;
