//! Document parsing pipeline: delimiter splitting, then metadata validation.
//!
//! Both stages are pure functions over in-memory text.

pub mod front_matter;
pub mod metadata;
