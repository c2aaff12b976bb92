// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The AZUL substitution lifecycle.
//!
//! Replacing an AZUL beneficiary pairs two records: the original flips to
//! `Pending` with a `change_date`, and a substitute is created carrying
//! `previous_*` fields pointing back at it plus the same `change_date`.
//! The pair later finalizes (original deleted, substitute promoted) or
//! cancels (substitute deleted, original restored).
//!
//! Pair lookups always match CPF *and* `change_date` within one
//! profile+program, so two substitutions initiated on the same day can
//! never cross-link.
//!
//! Callers must run each of these operations inside one repository
//! transaction; a reader must never observe a half-finalized pair.

use crate::error::CoreError;
use crate::repository::{BeneficiaryRepository, RepositoryError};
use chrono::NaiveDate;
use fideliza_domain::{Beneficiary, Cpf, DomainError, NewBeneficiary, Program, Status, compute_status};

/// Starts a substitution: the existing record becomes the pending
/// original and a pending substitute is inserted alongside it.
///
/// The substitute's enrollment day must be exactly `today`; the caller
/// has already verified that `cpf` differs from the record being
/// replaced.
pub(crate) fn initiate<R: BeneficiaryRepository>(
    repo: &mut R,
    existing: &Beneficiary,
    name: Option<String>,
    cpf: Cpf,
    issue_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Beneficiary, CoreError> {
    let issue_date: NaiveDate = issue_date.unwrap_or(today);
    if issue_date > today {
        return Err(DomainError::FutureIssueDate { issue_date }.into());
    }
    if issue_date < today {
        return Err(DomainError::BackdatedIssueDate { issue_date }.into());
    }

    let mut original: Beneficiary = existing.clone();
    original.change_date = Some(today);
    original.status = Status::Pending;
    repo.update_beneficiary(&original)?;

    let substitute = NewBeneficiary {
        profile_id: existing.profile_id,
        program: existing.program,
        name: name.unwrap_or_else(|| existing.name.clone()),
        cpf: cpf.clone(),
        issue_date,
        status: Status::Pending,
        change_date: Some(today),
        previous_name: Some(existing.name.clone()),
        previous_cpf: Some(existing.cpf.clone()),
        previous_issue_date: Some(existing.issue_date),
    };

    repo.insert_beneficiary(substitute).map_err(|err| match err {
        RepositoryError::UniqueViolation { .. } => {
            CoreError::DomainViolation(DomainError::DuplicateCpf {
                cpf: cpf.value().to_string(),
            })
        }
        other => CoreError::Repository(other),
    })
}

/// Finalizes a substitution: deletes the original half (if still present)
/// and promotes the substitute to a plain `Used` record.
///
/// A missing original is tolerated as a no-op for that side.
pub(crate) fn finalize<R: BeneficiaryRepository>(
    repo: &mut R,
    substitute: &Beneficiary,
) -> Result<Beneficiary, CoreError> {
    if let (Some(previous_cpf), Some(change_date)) =
        (&substitute.previous_cpf, substitute.change_date)
    {
        let original =
            repo.find_by_cpf(substitute.profile_id, substitute.program, previous_cpf)?;
        if let Some(original) = original {
            if original.change_date == Some(change_date) {
                repo.delete_beneficiary(original.id)?;
            }
        }
    }

    let mut promoted: Beneficiary = substitute.clone();
    promoted.status = Status::Used;
    promoted.change_date = None;
    promoted.previous_name = None;
    promoted.previous_cpf = None;
    promoted.previous_issue_date = None;
    repo.update_beneficiary(&promoted)?;

    Ok(promoted)
}

/// Cancels a pending substitution from either half of the pair.
///
/// The substitute is deleted and the original restored with its pending
/// markers cleared and status recomputed. Returns the surviving record,
/// or `None` when the paired original has already vanished.
pub(crate) fn cancel<R: BeneficiaryRepository>(
    repo: &mut R,
    record: &Beneficiary,
    today: NaiveDate,
) -> Result<Option<Beneficiary>, CoreError> {
    if record.is_substitute() {
        // Invoked on the substitute: restore the original, then delete.
        let mut restored: Option<Beneficiary> = None;
        if let (Some(previous_cpf), Some(change_date)) = (&record.previous_cpf, record.change_date)
        {
            let original = repo.find_by_cpf(record.profile_id, record.program, previous_cpf)?;
            if let Some(original) = original {
                if original.change_date == Some(change_date) {
                    restored = Some(restore(repo, original, today)?);
                }
            }
        }
        repo.delete_beneficiary(record.id)?;
        return Ok(restored);
    }

    // Invoked on the original: delete the paired substitute, then restore.
    if let Some(change_date) = record.change_date {
        let substitute = repo.find_substitute(record.profile_id, &record.cpf, change_date)?;
        if let Some(substitute) = substitute {
            repo.delete_beneficiary(substitute.id)?;
        }
    }
    restore(repo, record.clone(), today).map(Some)
}

/// Clears a record's pending markers and recomputes its status.
fn restore<R: BeneficiaryRepository>(
    repo: &mut R,
    mut record: Beneficiary,
    today: NaiveDate,
) -> Result<Beneficiary, CoreError> {
    record.change_date = None;
    record.status = compute_status(
        Program::Azul,
        record.issue_date,
        None,
        today,
        record.is_substitute(),
    );
    repo.update_beneficiary(&record)?;
    Ok(record)
}
