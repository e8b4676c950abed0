//! This crate contains quality measures of trained Self-Organizing Maps: how well a map
//! quantizes its input data, how faithfully the lattice preserves the topology of the input space
//! and how well units separate input clusters.
//!
//! A map is described by [`models::Layer`] with input records mapped to its units. Measures are
//! constructed from [`quality::QualityContext`] and requested by name, either directly or through
//! [`quality::QualityEvaluator`] which keeps a registry of all known measures.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod models;
pub mod prelude;
pub mod quality;
pub mod utils;
