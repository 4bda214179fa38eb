//! Shared test utilities for the date-validation workspace.
//!
//! This crate provides:
//! - Proptest generators for date inputs and provider-state payloads
//! - Fixtures for the committed consumer/provider contract

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;
