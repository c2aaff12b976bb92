// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot accounting across a profile's beneficiaries.
//!
//! Two counting shapes exist:
//!
//! - **LATAM / SMILES** slots are reusable after expiry: remaining base
//!   capacity plus every beneficiary already `Released` as of the
//!   reference day, since a released beneficiary can be overwritten by a
//!   new enrollment without consuming capacity.
//! - **AZUL** slots are reserved during a swap: a pending substitution
//!   pair occupies exactly one slot, never two, regardless of whether one
//!   or both halves are still present.

use crate::calendar;
use crate::types::{Beneficiary, Program, Status};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Computes how many enrollment slots are available for a profile+program
/// as of a reference day.
///
/// Records for other programs in the input are ignored. The result is
/// never negative.
#[must_use]
pub fn available_slots(
    program: Program,
    beneficiaries: &[Beneficiary],
    reference_date: NaiveDate,
) -> u32 {
    let limit: u32 = program.slot_limit();
    let in_program = beneficiaries.iter().filter(|b| b.program == program);

    match program {
        Program::Azul => {
            // A pending pair shares one change_date; each distinct
            // change_date group holds exactly one slot.
            let mut pending_groups: BTreeSet<NaiveDate> = BTreeSet::new();
            let mut occupied: u32 = 0;
            for beneficiary in in_program {
                match (beneficiary.status_as_of(reference_date), beneficiary.change_date) {
                    (Status::Pending, Some(change)) => {
                        pending_groups.insert(change);
                    }
                    _ => occupied += 1,
                }
            }
            let groups = u32::try_from(pending_groups.len()).unwrap_or(u32::MAX);
            limit.saturating_sub(occupied.saturating_add(groups))
        }
        Program::Latam | Program::Smiles => {
            let mut total: u32 = 0;
            let mut released: u32 = 0;
            for beneficiary in in_program {
                total += 1;
                if beneficiary.status_as_of(reference_date) == Status::Released {
                    released += 1;
                }
            }
            limit.saturating_sub(total) + released
        }
    }
}

/// Returns the inclusive enrollment-counting window for creation-time
/// ceiling checks, or `None` when the program counts all records.
///
/// - LATAM: the rolling 12 months ending at the provided enrollment day
/// - SMILES: the enrollment day's calendar year
/// - AZUL: `None` (plain count against the ceiling)
#[must_use]
pub fn enrollment_window(program: Program, issue_date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match program {
        Program::Latam => {
            let start: NaiveDate = issue_date
                .checked_sub_months(chrono::Months::new(12))
                .unwrap_or(NaiveDate::MIN);
            Some((start, issue_date))
        }
        Program::Smiles => {
            let start = calendar::jan_first(issue_date.year());
            let end = NaiveDate::from_ymd_opt(issue_date.year(), 12, 31).unwrap_or(NaiveDate::MAX);
            Some((start, end))
        }
        Program::Azul => None,
    }
}
