//! Request body transformations for the Gemini proxy.
//!
//! This module provides:
//! - `normalize`: canonicalize heterogeneous client payload shapes into an
//!   ordered content list
//! - `merge`: shallow-merge client generation config over the fixed defaults
//! - `persona`: persona injection and identity-probe reinforcement
//! - `prepare`: the unified pipeline turning raw request bytes into the
//!   outbound body (or a passthrough of the original bytes)

pub mod merge;
pub mod normalize;
pub mod persona;
pub mod prepare;

pub use prepare::{PreparedBody, prepare_generate_request};
