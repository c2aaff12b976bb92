// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation of stale AZUL pending pairs.
//!
//! Status is computed lazily on read, but the physical pairing records
//! need eventual deletion/consolidation to keep storage and slot counts
//! accurate. Instead of a scheduled background job, this sweep piggybacks
//! on read paths: it runs before a profile's beneficiary list is served.
//!
//! Two independent thresholds apply:
//!
//! - a substitute finalizes once `QUARANTINE_DAYS` have elapsed since its
//!   own `issue_date` (original deleted, substitute promoted);
//! - an original half still pending `ORPHAN_REMOVAL_DAYS` after its
//!   `change_date` is deleted outright, covering pairs whose substitute
//!   already finalized or vanished.
//!
//! A failure on one record never aborts the sweep for the rest.

use crate::error::CoreError;
use crate::repository::BeneficiaryRepository;
use crate::substitution;
use chrono::NaiveDate;
use fideliza_domain::{
    Beneficiary, ORPHAN_REMOVAL_DAYS, Program, QUARANTINE_DAYS, Status, days_between,
};
use tracing::warn;

/// Reconciles all pending AZUL records of one profile against `today`.
///
/// # Errors
///
/// Returns an error only if the initial listing fails; per-record
/// failures are logged and skipped.
pub fn reconcile_pending<R: BeneficiaryRepository>(
    repo: &mut R,
    profile_id: i64,
    today: NaiveDate,
) -> Result<(), CoreError> {
    let pending: Vec<Beneficiary> = repo
        .list_beneficiaries(profile_id, Some(Program::Azul))?
        .into_iter()
        .filter(|b| b.status == Status::Pending)
        .collect();

    // Substitute halves first: finalization also removes the paired
    // original, so the orphan pass below only sees genuine leftovers.
    for record in pending.iter().filter(|b| b.is_substitute()) {
        if days_between(today, record.issue_date) < QUARANTINE_DAYS {
            continue;
        }
        if let Err(err) = substitution::finalize(repo, record) {
            warn!(
                beneficiary_id = record.id,
                error = %err,
                "failed to finalize aged substitution, skipping record"
            );
        }
    }

    for record in pending.iter().filter(|b| !b.is_substitute()) {
        let Some(change_date) = record.change_date else {
            continue;
        };
        if days_between(today, change_date) < ORPHAN_REMOVAL_DAYS {
            continue;
        }
        // The finalize pass above may already have consumed this original.
        match repo.find_beneficiary(record.id) {
            Ok(Some(_)) => {}
            Ok(None) => continue,
            Err(err) => {
                warn!(
                    beneficiary_id = record.id,
                    error = %err,
                    "failed to re-check orphaned pending original, skipping record"
                );
                continue;
            }
        }
        if let Err(err) = repo.delete_beneficiary(record.id) {
            warn!(
                beneficiary_id = record.id,
                error = %err,
                "failed to remove orphaned pending original, skipping record"
            );
        }
    }

    Ok(())
}
