//! URL handling module for magpie
//!
//! This module provides domain extraction, reference resolution against a
//! base URL, and the target-extension set that decides which discovered
//! URLs are download candidates.

mod domain;
mod resolve;
mod targets;

pub use domain::extract_domain;
pub use resolve::resolve_reference;
pub use targets::{Mode, TargetSet};
