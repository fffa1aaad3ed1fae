//! Stata installation discovery.
//!
//! This crate answers two questions for the setup workflow:
//!
//! - What platform is this? ([`HostPlatform::detect`])
//! - Where is Stata installed? ([`find_stata`], walking a ranked table of
//!   well-known install locations per platform)
//!
//! Discovery is best-effort: a miss is an ordinary `None`, and the caller
//! falls back to asking the operator.

pub mod locate;
pub mod platform;

pub use locate::{find_stata, first_existing};
pub use platform::{candidate_paths, example_path, HostPlatform};
