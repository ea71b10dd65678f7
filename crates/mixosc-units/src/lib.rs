//! Value codec for mixer parameters.
//!
//! Mixers carry every continuous parameter as a normalized float on the
//! wire. This crate maps those floats to and from human units:
//! - [`curve`]: linear, logarithmic and inverted-log (Q) mappings
//! - [`fader`]: the 5-segment piecewise fader taper
//! - [`param`]: one declarative mapping per parameter kind
//! - [`table`]: enumerations carried as table indices (ratio, EQ type, gate mode)
//!
//! Everything here is pure and thread-safe.

pub mod curve;
pub mod error;
pub mod fader;
pub mod param;
pub mod table;

pub use curve::{lin_get, lin_set, log_get, log_set, q_get, q_set};
pub use error::{Result, UnitsError};
pub use fader::{db_from_level, db_into_level};
pub use param::{Mapping, Param};
pub use table::{EnumTable, COMP_RATIOS, EQ_TYPES, GATE_MODES};
