// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Program, Status};
use chrono::NaiveDate;

/// Errors that can occur during domain validation and rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Beneficiary name is outside length bounds or contains invalid characters.
    InvalidName(String),
    /// CPF is not exactly 11 ASCII digits.
    InvalidCpf(String),
    /// Program string is not one of the three supported programs.
    InvalidProgram(String),
    /// Status string is not a valid status.
    InvalidStatus(String),
    /// Failed to parse date from string.
    DateParse {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Enrollment date lies in the future.
    FutureIssueDate {
        /// The rejected enrollment day.
        issue_date: NaiveDate,
    },
    /// A substitution's enrollment date precedes the current day.
    BackdatedIssueDate {
        /// The rejected enrollment day.
        issue_date: NaiveDate,
    },
    /// CPF already enrolled within the same profile+program scope.
    DuplicateCpf {
        /// The conflicting CPF digits.
        cpf: String,
    },
    /// Program slot ceiling reached at enrollment time.
    LimitExceeded {
        /// The program whose ceiling was hit.
        program: Program,
        /// The ceiling value.
        limit: u32,
    },
    /// An edit provided no field that differs from the stored record.
    NoChangesDetected,
    /// Cancellation requested on a record with no pending change.
    CancelNotAllowed {
        /// The record's program.
        program: Program,
        /// The record's stored status.
        status: Status,
    },
    /// Beneficiary does not exist.
    BeneficiaryNotFound(i64),
    /// Profile does not exist.
    ProfileNotFound(i64),
    /// Profile is not owned by the calling user.
    AccessDenied {
        /// The profile that was targeted.
        profile_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCpf(value) => {
                write!(f, "Invalid CPF '{value}': must be exactly 11 digits")
            }
            Self::InvalidProgram(value) => write!(f, "Invalid program: {value}"),
            Self::InvalidStatus(value) => write!(f, "Invalid status: {value}"),
            Self::DateParse { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::FutureIssueDate { issue_date } => {
                write!(f, "Enrollment date {issue_date} cannot be in the future")
            }
            Self::BackdatedIssueDate { issue_date } => {
                write!(
                    f,
                    "Substitution enrollment date {issue_date} cannot precede the current day"
                )
            }
            Self::DuplicateCpf { cpf } => {
                write!(f, "CPF '{cpf}' is already enrolled in this program")
            }
            Self::LimitExceeded { program, limit } => {
                write!(f, "Slot limit of {limit} reached for {program}")
            }
            Self::NoChangesDetected => write!(f, "No changes detected"),
            Self::CancelNotAllowed { program, status } => {
                write!(
                    f,
                    "Only pending AZUL changes can be cancelled (record is {program}/{status})"
                )
            }
            Self::BeneficiaryNotFound(id) => write!(f, "Beneficiary {id} not found"),
            Self::ProfileNotFound(id) => write!(f, "Profile {id} not found"),
            Self::AccessDenied { profile_id } => {
                write!(f, "Access denied to profile {profile_id}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
