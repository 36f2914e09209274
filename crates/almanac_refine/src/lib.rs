//! Timestamp refinement for detected events.
//!
//! Detection only knows that a transition happened somewhere inside one
//! sample interval. This crate narrows each event's instant to sub-sample
//! precision by bisecting a wrap-aware scalar function of time — sign
//! boundary offset for ingresses, longitude speed for stations, target
//! separation offset for aspects — evaluated through an external
//! high-precision position oracle. Oracle failures degrade the single
//! affected event back to its sample-time instant; they never abort the
//! batch.

pub mod error;
pub mod oracle;
pub mod refine;
pub mod refine_types;

pub use error::RefineError;
pub use oracle::{OracleError, OracleState, PositionOracle};
pub use refine::{refine, refine_all};
pub use refine_types::RefineConfig;
