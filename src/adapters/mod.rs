//! Adapter implementations for the port traits.
//!
//! `live` adapters talk to the real system (disk, clock, network);
//! `fixed` adapters are deterministic in-memory substitutes used by
//! tests and available to embedders.

pub mod fixed;
pub mod live;
