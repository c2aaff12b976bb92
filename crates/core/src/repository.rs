// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The injected storage boundary.
//!
//! The core performs all reads and writes through this trait; it never
//! owns storage state directly. Implementations provide plain CRUD plus
//! the count/find-by-predicate lookups the rules need. Atomicity for
//! multi-record sequences is the caller's responsibility: wrap service
//! calls in one transaction at the repository boundary.

use chrono::NaiveDate;
use fideliza_domain::{Beneficiary, Cpf, NewBeneficiary, Profile, Program};

/// Errors surfaced by a repository implementation.
///
/// Storage-specific failures are stringified; uniqueness violations keep
/// their own variant so the core can translate them into a domain-level
/// conflict instead of leaking a storage error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated.
    UniqueViolation {
        /// Backend-provided detail for diagnostics.
        detail: String,
    },
    /// The targeted record does not exist.
    NotFound(String),
    /// Any other storage failure.
    Storage(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation { detail } => write!(f, "Uniqueness violation: {detail}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Storage operations required by the beneficiary services.
pub trait BeneficiaryRepository {
    /// Loads a profile by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_profile(&mut self, profile_id: i64) -> Result<Option<Profile>, RepositoryError>;

    /// Loads a beneficiary by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_beneficiary(&mut self, id: i64) -> Result<Option<Beneficiary>, RepositoryError>;

    /// Lists a profile's beneficiaries, newest first, optionally narrowed
    /// to one program.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_beneficiaries(
        &mut self,
        profile_id: i64,
        program: Option<Program>,
    ) -> Result<Vec<Beneficiary>, RepositoryError>;

    /// Finds the beneficiary enrolled under a CPF within one
    /// profile+program scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_cpf(
        &mut self,
        profile_id: i64,
        program: Program,
        cpf: &Cpf,
    ) -> Result<Option<Beneficiary>, RepositoryError>;

    /// Finds the substitute half of an AZUL pair: the record whose
    /// `previous_cpf` and `change_date` match the original half.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_substitute(
        &mut self,
        profile_id: i64,
        previous_cpf: &Cpf,
        change_date: NaiveDate,
    ) -> Result<Option<Beneficiary>, RepositoryError>;

    /// Counts all records for a profile+program.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<u32, RepositoryError>;

    /// Counts records for a profile+program whose `issue_date` falls in
    /// the inclusive window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_in_window(
        &mut self,
        profile_id: i64,
        program: Program,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, RepositoryError>;

    /// Inserts a beneficiary, assigning its id and creation instant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UniqueViolation` if the CPF is already
    /// enrolled in the profile+program scope.
    fn insert_beneficiary(
        &mut self,
        beneficiary: NewBeneficiary,
    ) -> Result<Beneficiary, RepositoryError>;

    /// Persists all mutable fields of an existing beneficiary.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record no longer exists.
    fn update_beneficiary(&mut self, beneficiary: &Beneficiary) -> Result<(), RepositoryError>;

    /// Deletes a beneficiary by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record no longer exists.
    fn delete_beneficiary(&mut self, id: i64) -> Result<(), RepositoryError>;

    /// Deletes every beneficiary of a profile+program, returning the
    /// number of records removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn delete_all_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<usize, RepositoryError>;
}
