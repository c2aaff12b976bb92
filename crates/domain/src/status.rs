// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status calculation for enrolled beneficiaries.
//!
//! `compute_status` is the single source of truth for a beneficiary's
//! eligibility status. It is pure and deterministic: identical inputs
//! always produce identical output, so client-displayed and persisted
//! status can never disagree on the same reference day.
//!
//! ## Program rules (all comparisons at Brazil day granularity)
//!
//! - **LATAM**: `Used` strictly before the enrollment anniversary
//!   (`issue_date` + 1 calendar year), `Released` at or after it.
//! - **SMILES**: eligibility resets every January 1 following enrollment.
//! - **AZUL**: `Used` unless a substitution is underway; while a
//!   `change_date` is set, `Pending` inside the quarantine window, then
//!   `Used` for the substitute half and `Released` for the original half.

use crate::calendar;
use crate::types::{Beneficiary, Program, Status};
use chrono::{Datelike, NaiveDate};

/// Length of the AZUL substitution quarantine, in days from `change_date`.
///
/// The reconciliation sweep finalizes a substitute once this many days
/// have elapsed since the substitute's own `issue_date`; the two anchors
/// coincide because a substitution is always initiated on its issue day.
pub const QUARANTINE_DAYS: i64 = 30;

/// Fallback removal threshold for orphaned original halves, in days from
/// `change_date`. Independent of `QUARANTINE_DAYS`, not a duplicate.
pub const ORPHAN_REMOVAL_DAYS: i64 = 60;

/// Computes the status of a beneficiary as of a reference day.
///
/// # Arguments
///
/// * `program` - The loyalty program the beneficiary is enrolled in
/// * `issue_date` - The enrollment day (Brazil calendar)
/// * `change_date` - Pending-substitution day, if any (AZUL only)
/// * `reference_date` - The day to evaluate against
/// * `is_substitute` - Whether this record is the substitute half of a pair
#[must_use]
pub fn compute_status(
    program: Program,
    issue_date: NaiveDate,
    change_date: Option<NaiveDate>,
    reference_date: NaiveDate,
    is_substitute: bool,
) -> Status {
    match program {
        Program::Latam => {
            let anniversary: NaiveDate = calendar::add_years(issue_date, 1);
            if reference_date < anniversary {
                Status::Used
            } else {
                Status::Released
            }
        }
        Program::Smiles => {
            if issue_date.year() < reference_date.year() {
                return Status::Released;
            }
            let reset: NaiveDate = calendar::jan_first(issue_date.year() + 1);
            if reference_date < reset {
                Status::Used
            } else {
                Status::Released
            }
        }
        Program::Azul => change_date.map_or(Status::Used, |change| {
            if calendar::days_between(reference_date, change) < QUARANTINE_DAYS {
                Status::Pending
            } else if is_substitute {
                Status::Used
            } else {
                Status::Released
            }
        }),
    }
}

impl Beneficiary {
    /// Recomputes this record's status as of a reference day.
    #[must_use]
    pub fn status_as_of(&self, reference_date: NaiveDate) -> Status {
        compute_status(
            self.program,
            self.issue_date,
            self.change_date,
            reference_date,
            self.is_substitute(),
        )
    }
}
