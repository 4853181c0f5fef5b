//! # Workflows Module
//!
//! End-to-end procedures built on top of [`crate::core`].
//!
//! - **Generate Workflow** ([`generate`]) - Load a TOML problem definition,
//!   validate the resulting tree, and write the `for001.dat` deck.

pub mod generate;
