//! Document parsing utilities
//!
//! This module contains the two ways of turning a package into an
//! [`XmlNode`](super::models::XmlNode) tree and the walker that reads
//! text out of that tree.

#[cfg(feature = "rich")]
pub(crate) mod rich;
pub mod walker;
pub mod xml;
