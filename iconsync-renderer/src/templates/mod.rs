//! Generated icon package.
//!
//! Generated by iconsync. Do not edit: the module is rewritten on every sync.

pub mod icons;
pub mod rollup;
pub mod support;

pub use rollup::*;
pub use support::Attributes;
