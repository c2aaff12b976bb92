// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Beneficiary operations for the Fideliza Beneficiary System.
//!
//! This crate orchestrates the pure rules from `fideliza-domain` against
//! an injected [`BeneficiaryRepository`]: enrollment with ceiling checks,
//! edits (including the AZUL substitution lifecycle), cancellation,
//! deletion, availability queries, and the reconciliation sweep that
//! keeps stale pending pairs consistent.
//!
//! The core never owns storage state. Multi-record writes (substitution
//! initiate/finalize/cancel, the sweep) must be wrapped in a single
//! atomic transaction at the repository boundary by the caller.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod repository;
mod service;
mod substitution;
mod sweep;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use repository::{BeneficiaryRepository, RepositoryError};
pub use service::{
    BeneficiaryUpdate, EnrollmentRequest, available_slots, cancel_pending_change,
    create_beneficiary, delete_all_for_program, delete_beneficiary, edit_beneficiary,
    list_with_status,
};
pub use sweep::reconcile_pending;
