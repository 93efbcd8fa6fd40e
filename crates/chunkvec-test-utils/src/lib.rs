//! Test utilities and fixtures for chunkvec development.
//!
//! Provides a two-field [`Record`] element, builders for pre-populated
//! containers, and layout assertions for white-box tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{assert_layout, layout, numbered, reference_records, Record};
