//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Custom assertions
//! - Test fixtures and builders
//! - PDF inspection helpers

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;

use std::sync::{Mutex, MutexGuard};

/// Serializes MuPDF use across the tests of one binary.
static MUPDF_LOCK: Mutex<()> = Mutex::new(());

/// Holds the MuPDF lock until the guard is dropped.
pub fn mupdf_guard() -> MutexGuard<'static, ()> {
    MUPDF_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
