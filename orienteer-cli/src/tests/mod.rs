//! Shared test harness modules for the orienteer CLI.
#![expect(
    clippy::expect_used,
    reason = "tests use expect to surface unexpected CLI outcomes"
)]

use super::*;

mod audit_unit;
mod helpers;
