// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Fideliza Beneficiary System.
//!
//! This crate stores profiles and beneficiary enrollments in `SQLite`
//! via Diesel and exposes the [`fideliza_core::BeneficiaryRepository`]
//! implementation the core services run against.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - in-memory databases for unit and integration tests
//! - WAL-mode file databases for deployments
//!
//! Dates are stored as ISO 8601 day strings; the schema enforces the
//! one-CPF-per-profile-per-program constraint with a unique index so the
//! database backstops the service-level duplicate check.
//!
//! ## Transactions
//!
//! Multi-record operations (AZUL substitutions, the reconciliation
//! sweep) must be atomic. [`Persistence::with_transaction`] wraps a
//! closure over the repository in one `SQLite` transaction; any error
//! rolls the whole operation back.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use fideliza_core::{CoreError, RepositoryError};
use fideliza_domain::{Cpf, Profile};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod data_models;
mod diesel_schema;
mod error;
mod repository;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use repository::SqliteRepository;

use data_models::ProfileRow;
use diesel_schema::profiles;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Internal error carrier for Diesel's transaction API, which requires
/// `From<diesel::result::Error>` on the closure's error type.
enum TxError {
    Core(CoreError),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err)
    }
}

/// An open, migrated `SQLite` database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a fresh in-memory database with migrations applied.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration, or foreign key
    /// verification fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are
        // isolated. Atomic counter instead of timestamp to eliminate
        // race conditions.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens (creating if needed) a file-backed database in WAL mode
    /// with migrations applied.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration, or foreign key
    /// verification fails.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let database_url: String = path.as_ref().display().to_string();

        let mut conn: SqliteConnection = sqlite::initialize_database(&database_url)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(database = %database_url, "Opened file-backed database");
        Ok(Self { conn })
    }

    /// Returns a repository over this connection, outside any explicit
    /// transaction. Single-statement reads only; mutations belong in
    /// [`Self::with_transaction`].
    #[must_use]
    pub fn repository(&mut self) -> SqliteRepository<'_> {
        SqliteRepository::new(&mut self.conn)
    }

    /// Runs `operation` against the repository inside one database
    /// transaction. Any error rolls back every write the closure made.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a repository error if the
    /// transaction itself fails to commit.
    pub fn with_transaction<T, F>(&mut self, operation: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut SqliteRepository<'_>) -> Result<T, CoreError>,
    {
        let result: Result<T, TxError> = self.conn.transaction(|conn| {
            let mut repo: SqliteRepository<'_> = SqliteRepository::new(conn);
            operation(&mut repo).map_err(TxError::Core)
        });

        match result {
            Ok(value) => Ok(value),
            Err(TxError::Core(err)) => Err(err),
            Err(TxError::Db(err)) => Err(CoreError::Repository(RepositoryError::from(
                PersistenceError::from(err),
            ))),
        }
    }

    /// Inserts a profile row, returning the stored profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_profile(
        &mut self,
        user_id: i64,
        name: &str,
        cpf: &Cpf,
    ) -> Result<Profile, PersistenceError> {
        diesel::insert_into(profiles::table)
            .values((
                profiles::user_id.eq(user_id),
                profiles::name.eq(name),
                profiles::cpf.eq(cpf.value()),
            ))
            .execute(&mut self.conn)?;

        let profile_id: i64 = sqlite::get_last_insert_rowid(&mut self.conn)?;
        let row: ProfileRow = profiles::table
            .find(profile_id)
            .first::<ProfileRow>(&mut self.conn)?;
        let profile: Profile = Profile::try_from(row)?;

        info!(profile_id, user_id, "Profile created");
        Ok(profile)
    }
}
