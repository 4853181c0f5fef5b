//! # Core Module
//!
//! This module provides the building blocks for describing an ICOOL problem and
//! serialising it into the simulator's positional text format.
//!
//! ## Overview
//!
//! ICOOL reads its input deck by position, not by name: a solenoid field is a
//! `SOL` tag followed by exactly fifteen numbers whose meaning depends on the
//! first one (the model number). The core module lets callers work with named,
//! type-checked parameters instead, and guarantees that the rendered deck keeps
//! every value in the slot the simulator expects.
//!
//! ## Architecture
//!
//! - **Values** ([`value`]) - Dynamically typed parameter values and their semantic types
//! - **Catalogs** ([`catalog`]) - Static tables describing every model of every modeled family
//! - **Modeled parameters** ([`params`]) - Fields, materials, distributions and correlations
//! - **Records** ([`records`]) - Namelists, beam types and the region tree
//! - **File I/O** ([`io`]) - The `for001.dat` writer and the TOML problem-file loader
//! - **Errors** ([`error`]) - The validation error taxonomy shared by every layer

pub mod catalog;
pub mod error;
pub mod io;
pub mod params;
pub mod records;
pub mod value;
