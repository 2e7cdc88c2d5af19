//! # Base types for pgncheck
//!
//! This is an auxiliary crate for `pgncheck`, holding the square/piece value
//! types and the pure move geometry they obey. It carries no board state and
//! no parsing beyond square coordinates.
//!
//! Normally you don't want to use this crate directly. Use `pgncheck`
//! instead.

pub mod geometry;
pub mod types;
