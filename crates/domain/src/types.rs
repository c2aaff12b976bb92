// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The three supported loyalty programs.
///
/// The program set is closed-world: each program carries its own
/// slot ceiling and eligibility-window rule, hard-coded in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Program {
    /// Rolling 12-month window from each enrollment date, 25 slots.
    Latam,
    /// Calendar-year window of the enrollment date, 25 slots.
    Smiles,
    /// 5 concurrently held slots with a substitution quarantine.
    Azul,
}

impl Program {
    /// Returns the string representation of the program.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latam => "LATAM",
            Self::Smiles => "SMILES",
            Self::Azul => "AZUL",
        }
    }

    /// Returns the slot ceiling for this program, per profile.
    #[must_use]
    pub const fn slot_limit(&self) -> u32 {
        match self {
            Self::Latam | Self::Smiles => 25,
            Self::Azul => 5,
        }
    }

    /// Parses a program from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "LATAM" => Ok(Self::Latam),
            "SMILES" => Ok(Self::Smiles),
            "AZUL" => Ok(Self::Azul),
            _ => Err(DomainError::InvalidProgram(s.to_string())),
        }
    }
}

impl FromStr for Program {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Eligibility status of a beneficiary, derived from dates and program rules.
///
/// Status is a cache of a pure derivation: writes refresh it, but read
/// paths always recompute it via `compute_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The beneficiary currently counts against the program's slot ceiling.
    Used,
    /// The eligibility window has elapsed; the slot can be reused.
    Released,
    /// AZUL only: the beneficiary is locked inside a substitution quarantine.
    Pending,
}

impl Status {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Used => "used",
            Self::Released => "released",
            Self::Pending => "pending",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "used" => Ok(Self::Used),
            "released" => Ok(Self::Released),
            "pending" => Ok(Self::Pending),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An 11-digit Brazilian tax identifier (CPF).
///
/// Only the format is validated here; check-digit arithmetic is a
/// presentation concern outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpf {
    value: String,
}

impl Cpf {
    /// Parses a CPF from a string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCpf` unless the input is exactly
    /// 11 ASCII digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.len() == 11 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self {
                value: value.to_string(),
            })
        } else {
            Err(DomainError::InvalidCpf(value.to_string()))
        }
    }

    /// Returns the CPF digits.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A person enrolled by a profile under a loyalty program.
///
/// During an AZUL substitution two records briefly coexist for one slot:
/// the original (no `previous_*` fields) and the substitute (with
/// `previous_*` pointing back at the record it replaces). Both share the
/// same `change_date` until reconciliation resolves the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: i64,
    pub profile_id: i64,
    pub program: Program,
    pub name: String,
    pub cpf: Cpf,
    /// Calendar day the beneficiary was enrolled (Brazil calendar). For an
    /// AZUL substitute this is the day the replacement was initiated.
    pub issue_date: NaiveDate,
    /// Cached status; authoritative value comes from `compute_status`.
    pub status: Status,
    /// Set only while an AZUL substitution is pending; shared by both
    /// halves of the pair.
    pub change_date: Option<NaiveDate>,
    pub previous_name: Option<String>,
    pub previous_cpf: Option<Cpf>,
    pub previous_issue_date: Option<NaiveDate>,
    /// Creation instant (RFC 3339), used for newest-first listing.
    pub created_at: String,
}

impl Beneficiary {
    /// Returns true if this record is the substitute (new) half of an
    /// AZUL substitution pair.
    ///
    /// Presence of `previous_cpf` is the pair discriminator.
    #[must_use]
    pub const fn is_substitute(&self) -> bool {
        self.previous_cpf.is_some()
    }
}

/// Field set for a beneficiary about to be inserted.
///
/// The repository assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeneficiary {
    pub profile_id: i64,
    pub program: Program,
    pub name: String,
    pub cpf: Cpf,
    pub issue_date: NaiveDate,
    pub status: Status,
    pub change_date: Option<NaiveDate>,
    pub previous_name: Option<String>,
    pub previous_cpf: Option<Cpf>,
    pub previous_issue_date: Option<NaiveDate>,
}

/// A named individual under a user account, owning beneficiaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    /// Owning user account. Opaque to the core; ownership checks compare it
    /// against the caller's identity.
    pub user_id: i64,
    pub name: String,
    pub cpf: Cpf,
}
