//! Control descriptors for terrarium.
//!
//! A control is a named setup action plus an ordered list of
//! condition/action pairs. This crate only holds their shape: evaluating
//! conditions against values and executing actions belongs to whatever
//! drives the controls.
//!
//! # Design Principles
//!
//! - **Data only**: descriptors are immutable once built
//! - **Order preserved**: condition/action pairs keep their declared order
//! - **Explicit registry**: no global state, the registry is passed around

pub mod control;
pub mod error;
pub mod registry;

pub use control::{ActionDescriptor, ConditionDescriptor, Control};
pub use error::{ControlError, ControlResult};
pub use registry::ControlRegistry;
