//! A command line interface library to evaluate quality measures of trained Self-Organizing Maps.
//!
//! A map is read from a JSON description, measures are selected with `key:variant|param`
//! notation and results are written as text.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
mod helpers;

pub mod extensions;
