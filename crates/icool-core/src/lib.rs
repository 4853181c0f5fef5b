//! # icoolgen Core Library
//!
//! A typed object model for building ICOOL problem definitions and writing them
//! out as the simulator's fixed-format `for001.dat` input deck.
//!
//! ## Architectural Philosophy
//!
//! The library is organised in two layers:
//!
//! - **[`core`]: The Foundation.** Static model catalogs, the modeled-parameter
//!   engine (a runtime tagged union whose valid field set and output layout follow
//!   a discriminator such as `model`), the validated record and region tree, and
//!   the `for001.dat` writer.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie the pieces
//!   together, such as loading a TOML problem definition and producing the deck.
//!
//! ## Example
//!
//! ```
//! use icoolgen::attrs;
//! use icoolgen::core::params::field::Sol;
//!
//! let sol = Sol::new(attrs! {
//!     "model" => "bz",
//!     "strength" => 1.5,
//!     "clen" => 2.0,
//!     "elen1" => 0.1,
//!     "offset" => 0.0,
//!     "elen2" => 0.1,
//! })
//! .unwrap();
//! assert_eq!(sol.render_positions().unwrap().len(), 15);
//! ```

pub mod core;
pub mod workflows;
