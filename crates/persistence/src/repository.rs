// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Diesel-backed [`BeneficiaryRepository`] implementation.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fideliza_core::{BeneficiaryRepository, RepositoryError};
use fideliza_domain::{Beneficiary, Cpf, NewBeneficiary, Profile, Program};

use crate::data_models::{BeneficiaryRow, ProfileRow, day_to_text};
use crate::diesel_schema::{beneficiaries, profiles};
use crate::error::PersistenceError;
use crate::sqlite;

/// Repository over a borrowed SQLite connection.
///
/// Borrowing (rather than owning) the connection lets a transaction
/// closure and the repository share one connection.
pub struct SqliteRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteRepository<'a> {
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

fn db_err(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(PersistenceError::from(err))
}

fn decode(row: BeneficiaryRow) -> Result<Beneficiary, RepositoryError> {
    Beneficiary::try_from(row).map_err(RepositoryError::from)
}

fn count_to_u32(count: i64) -> Result<u32, RepositoryError> {
    u32::try_from(count).map_err(|e| RepositoryError::Storage(format!("count overflow: {e}")))
}

impl BeneficiaryRepository for SqliteRepository<'_> {
    fn find_profile(&mut self, profile_id: i64) -> Result<Option<Profile>, RepositoryError> {
        let row: Option<ProfileRow> = profiles::table
            .find(profile_id)
            .first::<ProfileRow>(self.conn)
            .optional()
            .map_err(db_err)?;
        row.map(|r| Profile::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn find_beneficiary(&mut self, id: i64) -> Result<Option<Beneficiary>, RepositoryError> {
        let row: Option<BeneficiaryRow> = beneficiaries::table
            .find(id)
            .first::<BeneficiaryRow>(self.conn)
            .optional()
            .map_err(db_err)?;
        row.map(decode).transpose()
    }

    fn list_beneficiaries(
        &mut self,
        profile_id: i64,
        program: Option<Program>,
    ) -> Result<Vec<Beneficiary>, RepositoryError> {
        let mut query = beneficiaries::table
            .filter(beneficiaries::profile_id.eq(profile_id))
            .order(beneficiaries::beneficiary_id.desc())
            .into_boxed();
        if let Some(program) = program {
            query = query.filter(beneficiaries::program.eq(program.as_str()));
        }

        let rows: Vec<BeneficiaryRow> =
            query.load::<BeneficiaryRow>(self.conn).map_err(db_err)?;
        rows.into_iter().map(decode).collect()
    }

    fn find_by_cpf(
        &mut self,
        profile_id: i64,
        program: Program,
        cpf: &Cpf,
    ) -> Result<Option<Beneficiary>, RepositoryError> {
        let row: Option<BeneficiaryRow> = beneficiaries::table
            .filter(beneficiaries::profile_id.eq(profile_id))
            .filter(beneficiaries::program.eq(program.as_str()))
            .filter(beneficiaries::cpf.eq(cpf.value()))
            .first::<BeneficiaryRow>(self.conn)
            .optional()
            .map_err(db_err)?;
        row.map(decode).transpose()
    }

    fn find_substitute(
        &mut self,
        profile_id: i64,
        previous_cpf: &Cpf,
        change_date: NaiveDate,
    ) -> Result<Option<Beneficiary>, RepositoryError> {
        let row: Option<BeneficiaryRow> = beneficiaries::table
            .filter(beneficiaries::profile_id.eq(profile_id))
            .filter(beneficiaries::program.eq(Program::Azul.as_str()))
            .filter(beneficiaries::previous_cpf.eq(previous_cpf.value()))
            .filter(beneficiaries::change_date.eq(day_to_text(change_date)))
            .first::<BeneficiaryRow>(self.conn)
            .optional()
            .map_err(db_err)?;
        row.map(decode).transpose()
    }

    fn count_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<u32, RepositoryError> {
        let count: i64 = beneficiaries::table
            .filter(beneficiaries::profile_id.eq(profile_id))
            .filter(beneficiaries::program.eq(program.as_str()))
            .count()
            .get_result(self.conn)
            .map_err(db_err)?;
        count_to_u32(count)
    }

    fn count_in_window(
        &mut self,
        profile_id: i64,
        program: Program,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, RepositoryError> {
        // ISO day strings compare lexicographically in date order.
        let count: i64 = beneficiaries::table
            .filter(beneficiaries::profile_id.eq(profile_id))
            .filter(beneficiaries::program.eq(program.as_str()))
            .filter(beneficiaries::issue_date.between(day_to_text(start), day_to_text(end)))
            .count()
            .get_result(self.conn)
            .map_err(db_err)?;
        count_to_u32(count)
    }

    fn insert_beneficiary(
        &mut self,
        beneficiary: NewBeneficiary,
    ) -> Result<Beneficiary, RepositoryError> {
        diesel::insert_into(beneficiaries::table)
            .values((
                beneficiaries::profile_id.eq(beneficiary.profile_id),
                beneficiaries::program.eq(beneficiary.program.as_str()),
                beneficiaries::name.eq(&beneficiary.name),
                beneficiaries::cpf.eq(beneficiary.cpf.value()),
                beneficiaries::issue_date.eq(day_to_text(beneficiary.issue_date)),
                beneficiaries::status.eq(beneficiary.status.as_str()),
                beneficiaries::change_date.eq(beneficiary.change_date.map(day_to_text)),
                beneficiaries::previous_name.eq(beneficiary.previous_name.as_deref()),
                beneficiaries::previous_cpf
                    .eq(beneficiary.previous_cpf.as_ref().map(Cpf::value)),
                beneficiaries::previous_issue_date
                    .eq(beneficiary.previous_issue_date.map(day_to_text)),
            ))
            .execute(self.conn)
            .map_err(db_err)?;

        let id: i64 =
            sqlite::get_last_insert_rowid(self.conn).map_err(RepositoryError::from)?;
        self.find_beneficiary(id)?.ok_or_else(|| {
            RepositoryError::Storage(format!("inserted beneficiary {id} not readable"))
        })
    }

    fn update_beneficiary(&mut self, beneficiary: &Beneficiary) -> Result<(), RepositoryError> {
        let affected: usize = diesel::update(beneficiaries::table.find(beneficiary.id))
            .set((
                beneficiaries::name.eq(&beneficiary.name),
                beneficiaries::cpf.eq(beneficiary.cpf.value()),
                beneficiaries::issue_date.eq(day_to_text(beneficiary.issue_date)),
                beneficiaries::status.eq(beneficiary.status.as_str()),
                beneficiaries::change_date.eq(beneficiary.change_date.map(day_to_text)),
                beneficiaries::previous_name.eq(beneficiary.previous_name.as_deref()),
                beneficiaries::previous_cpf
                    .eq(beneficiary.previous_cpf.as_ref().map(Cpf::value)),
                beneficiaries::previous_issue_date
                    .eq(beneficiary.previous_issue_date.map(day_to_text)),
            ))
            .execute(self.conn)
            .map_err(db_err)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "beneficiary {}",
                beneficiary.id
            )));
        }
        Ok(())
    }

    fn delete_beneficiary(&mut self, id: i64) -> Result<(), RepositoryError> {
        let affected: usize = diesel::delete(beneficiaries::table.find(id))
            .execute(self.conn)
            .map_err(db_err)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!("beneficiary {id}")));
        }
        Ok(())
    }

    fn delete_all_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<usize, RepositoryError> {
        diesel::delete(
            beneficiaries::table
                .filter(beneficiaries::profile_id.eq(profile_id))
                .filter(beneficiaries::program.eq(program.as_str())),
        )
        .execute(self.conn)
        .map_err(db_err)
    }
}
