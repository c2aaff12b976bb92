// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The caller-facing beneficiary operations.
//!
//! Every operation verifies profile ownership before touching records,
//! validates its inputs before touching the repository, and recomputes
//! status through the pure calculator rather than trusting the stored
//! column. Read paths run the reconciliation sweep first so stale pending
//! pairs are resolved before they are observed.
//!
//! `today` is always an explicit parameter (the current Brazil calendar
//! day, per `fideliza_domain::today`); operations stay deterministic and
//! testable against any date.

use crate::error::CoreError;
use crate::repository::{BeneficiaryRepository, RepositoryError};
use crate::substitution;
use crate::sweep;
use chrono::NaiveDate;
use fideliza_domain::{
    Beneficiary, Cpf, DomainError, NewBeneficiary, Profile, Program, Status,
    available_slots as slots_available, compute_status, enrollment_window, parse_day,
    validate_name,
};

/// Input for a new enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub profile_id: i64,
    pub program: Program,
    pub name: String,
    /// Raw CPF digits, validated here.
    pub cpf: String,
    /// Raw date input, normalized via the calendar module.
    pub issue_date: String,
}

/// Optional field changes for an edit. Absent fields keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeneficiaryUpdate {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub issue_date: Option<String>,
}

/// Lists a profile's beneficiaries with reconciled, freshly computed
/// statuses, newest first.
///
/// # Errors
///
/// Returns an error if the profile is missing or not owned by the caller,
/// or if the repository fails.
pub fn list_with_status<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    profile_id: i64,
    program: Option<Program>,
    today: NaiveDate,
) -> Result<Vec<Beneficiary>, CoreError> {
    ensure_profile_owned(repo, user_id, profile_id)?;
    sweep::reconcile_pending(repo, profile_id, today)?;

    let mut records: Vec<Beneficiary> = repo.list_beneficiaries(profile_id, program)?;
    for record in &mut records {
        record.status = record.status_as_of(today);
    }
    Ok(records)
}

/// Enrolls a new beneficiary.
///
/// # Errors
///
/// Returns a validation error for malformed input, a conflict for a CPF
/// already enrolled in the scope, or `LimitExceeded` when the program's
/// ceiling is reached within its enrollment window.
pub fn create_beneficiary<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    request: &EnrollmentRequest,
    today: NaiveDate,
) -> Result<Beneficiary, CoreError> {
    ensure_profile_owned(repo, user_id, request.profile_id)?;

    validate_name(&request.name)?;
    let cpf: Cpf = Cpf::parse(&request.cpf)?;
    let issue_date: NaiveDate = parse_day(&request.issue_date)?;
    if issue_date > today {
        return Err(DomainError::FutureIssueDate { issue_date }.into());
    }

    let limit: u32 = request.program.slot_limit();
    let counted: u32 = match enrollment_window(request.program, issue_date) {
        Some((start, end)) => {
            repo.count_in_window(request.profile_id, request.program, start, end)?
        }
        None => repo.count_for_program(request.profile_id, request.program)?,
    };
    if counted >= limit {
        return Err(DomainError::LimitExceeded {
            program: request.program,
            limit,
        }
        .into());
    }

    if repo
        .find_by_cpf(request.profile_id, request.program, &cpf)?
        .is_some()
    {
        return Err(duplicate(&cpf));
    }

    let status: Status = compute_status(request.program, issue_date, None, today, false);
    let record = NewBeneficiary {
        profile_id: request.profile_id,
        program: request.program,
        name: request.name.clone(),
        cpf: cpf.clone(),
        issue_date,
        status,
        change_date: None,
        previous_name: None,
        previous_cpf: None,
        previous_issue_date: None,
    };

    repo.insert_beneficiary(record).map_err(|err| match err {
        RepositoryError::UniqueViolation { .. } => duplicate(&cpf),
        other => CoreError::Repository(other),
    })
}

/// Edits a beneficiary.
///
/// Routes internally: an AZUL edit that changes the CPF initiates a
/// substitution; anything else is a simple field update with status
/// recomputed.
///
/// # Errors
///
/// Returns validation, conflict, or invalid-state errors per the edit
/// rules; `NoChangesDetected` for an AZUL edit that changes nothing.
pub fn edit_beneficiary<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    id: i64,
    update: &BeneficiaryUpdate,
    today: NaiveDate,
) -> Result<Beneficiary, CoreError> {
    let existing: Beneficiary = repo
        .find_beneficiary(id)?
        .ok_or(DomainError::BeneficiaryNotFound(id))?;
    ensure_profile_owned(repo, user_id, existing.profile_id)?;

    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    let new_cpf: Option<Cpf> = update.cpf.as_deref().map(Cpf::parse).transpose()?;
    let new_issue_date: Option<NaiveDate> =
        update.issue_date.as_deref().map(parse_day).transpose()?;

    if existing.program == Program::Azul {
        let changed = update.name.as_ref().is_some_and(|n| *n != existing.name)
            || new_cpf.as_ref().is_some_and(|c| *c != existing.cpf)
            || new_issue_date.is_some_and(|d| d != existing.issue_date);
        if !changed {
            return Err(DomainError::NoChangesDetected.into());
        }

        if let Some(cpf) = new_cpf {
            if cpf != existing.cpf {
                // Replacing with an identity that is mid-swap (or already
                // enrolled) is a conflict either way.
                if existing.previous_cpf.as_ref() == Some(&cpf) {
                    return Err(duplicate(&cpf));
                }
                if let Some(other) = repo.find_by_cpf(existing.profile_id, existing.program, &cpf)?
                {
                    if other.id != id {
                        return Err(duplicate(&cpf));
                    }
                }
                return substitution::initiate(
                    repo,
                    &existing,
                    update.name.clone(),
                    cpf,
                    new_issue_date,
                    today,
                );
            }
        }

        return simple_update(repo, existing, update.name.clone(), None, new_issue_date, today);
    }

    // LATAM / SMILES: plain field correction.
    if let Some(cpf) = &new_cpf {
        if *cpf != existing.cpf
            && repo
                .find_by_cpf(existing.profile_id, existing.program, cpf)?
                .is_some()
        {
            return Err(duplicate(cpf));
        }
    }

    simple_update(repo, existing, update.name.clone(), new_cpf, new_issue_date, today)
}

/// Cancels a pending AZUL substitution, invoked on either half of the
/// pair. Returns the restored record when one survives.
///
/// # Errors
///
/// Returns `CancelNotAllowed` unless the record is AZUL with a pending
/// change.
pub fn cancel_pending_change<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    id: i64,
    today: NaiveDate,
) -> Result<Option<Beneficiary>, CoreError> {
    let existing: Beneficiary = repo
        .find_beneficiary(id)?
        .ok_or(DomainError::BeneficiaryNotFound(id))?;
    ensure_profile_owned(repo, user_id, existing.profile_id)?;

    if existing.program != Program::Azul || existing.status != Status::Pending {
        return Err(DomainError::CancelNotAllowed {
            program: existing.program,
            status: existing.status,
        }
        .into());
    }

    substitution::cancel(repo, &existing, today)
}

/// Deletes a beneficiary.
///
/// # Errors
///
/// Returns a not-found error if the record does not exist, or an
/// access error if its profile is not owned by the caller.
pub fn delete_beneficiary<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    id: i64,
) -> Result<(), CoreError> {
    let existing: Beneficiary = repo
        .find_beneficiary(id)?
        .ok_or(DomainError::BeneficiaryNotFound(id))?;
    ensure_profile_owned(repo, user_id, existing.profile_id)?;

    repo.delete_beneficiary(id)?;
    Ok(())
}

/// Deletes every beneficiary of a profile+program, returning how many
/// records were removed.
///
/// # Errors
///
/// Returns an access error if the profile is not owned by the caller.
pub fn delete_all_for_program<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    profile_id: i64,
    program: Program,
) -> Result<usize, CoreError> {
    ensure_profile_owned(repo, user_id, profile_id)?;
    Ok(repo.delete_all_for_program(profile_id, program)?)
}

/// Computes the available-slot count for a profile+program as of a
/// reference day.
///
/// The reference day may differ from `today` for forward-looking
/// queries; the sweep still runs against `today` so stale pairs do not
/// distort the count.
///
/// # Errors
///
/// Returns an error if the profile is missing or not owned by the
/// caller, or if the repository fails.
pub fn available_slots<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    profile_id: i64,
    program: Program,
    reference_date: NaiveDate,
    today: NaiveDate,
) -> Result<u32, CoreError> {
    ensure_profile_owned(repo, user_id, profile_id)?;
    sweep::reconcile_pending(repo, profile_id, today)?;

    let records: Vec<Beneficiary> = repo.list_beneficiaries(profile_id, Some(program))?;
    Ok(slots_available(program, &records, reference_date))
}

/// Loads a profile and verifies it belongs to the calling user.
fn ensure_profile_owned<R: BeneficiaryRepository>(
    repo: &mut R,
    user_id: i64,
    profile_id: i64,
) -> Result<Profile, CoreError> {
    let profile: Profile = repo
        .find_profile(profile_id)?
        .ok_or(DomainError::ProfileNotFound(profile_id))?;
    if profile.user_id != user_id {
        return Err(DomainError::AccessDenied { profile_id }.into());
    }
    Ok(profile)
}

/// Applies provided fields to a record, recomputes its status, and
/// persists it.
fn simple_update<R: BeneficiaryRepository>(
    repo: &mut R,
    mut record: Beneficiary,
    name: Option<String>,
    cpf: Option<Cpf>,
    issue_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Beneficiary, CoreError> {
    if let Some(name) = name {
        record.name = name;
    }
    if let Some(cpf) = cpf {
        record.cpf = cpf;
    }
    if let Some(issue_date) = issue_date {
        record.issue_date = issue_date;
    }
    record.status = record.status_as_of(today);

    repo.update_beneficiary(&record).map_err(|err| match err {
        RepositoryError::UniqueViolation { .. } => duplicate(&record.cpf),
        other => CoreError::Repository(other),
    })?;
    Ok(record)
}

fn duplicate(cpf: &Cpf) -> CoreError {
    CoreError::DomainViolation(DomainError::DuplicateCpf {
        cpf: cpf.value().to_string(),
    })
}
