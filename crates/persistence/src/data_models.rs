// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the SQL schema and the domain types.
//!
//! Dates are stored as ISO 8601 day strings so SQLite's lexicographic
//! `BETWEEN` matches chronological order. Decoding a row re-validates the
//! stored program, status, CPF, and dates; a failure means the database
//! was modified outside this crate and surfaces as a corrupt record.

use chrono::NaiveDate;
use diesel::prelude::*;
use fideliza_domain::{Beneficiary, Cpf, Profile, Program, Status};

use crate::error::PersistenceError;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn day_to_text(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn text_to_day(text: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(text, DAY_FORMAT)
        .map_err(|e| PersistenceError::CorruptRecord(format!("invalid stored date {text}: {e}")))
}

/// One row of the `beneficiaries` table, in schema column order.
#[derive(Debug, Clone, Queryable)]
pub struct BeneficiaryRow {
    pub beneficiary_id: i64,
    pub profile_id: i64,
    pub program: String,
    pub name: String,
    pub cpf: String,
    pub issue_date: String,
    pub status: String,
    pub change_date: Option<String>,
    pub previous_name: Option<String>,
    pub previous_cpf: Option<String>,
    pub previous_issue_date: Option<String>,
    pub created_at: String,
}

impl TryFrom<BeneficiaryRow> for Beneficiary {
    type Error = PersistenceError;

    fn try_from(row: BeneficiaryRow) -> Result<Self, Self::Error> {
        let program: Program = row
            .program
            .parse()
            .map_err(|_| corrupt("program", &row.program))?;
        let status: Status = row
            .status
            .parse()
            .map_err(|_| corrupt("status", &row.status))?;
        let cpf: Cpf = Cpf::parse(&row.cpf).map_err(|_| corrupt("cpf", &row.cpf))?;
        let previous_cpf: Option<Cpf> = row
            .previous_cpf
            .as_deref()
            .map(|value| Cpf::parse(value).map_err(|_| corrupt("previous_cpf", value)))
            .transpose()?;

        Ok(Self {
            id: row.beneficiary_id,
            profile_id: row.profile_id,
            program,
            name: row.name,
            cpf,
            issue_date: text_to_day(&row.issue_date)?,
            status,
            change_date: row.change_date.as_deref().map(text_to_day).transpose()?,
            previous_name: row.previous_name,
            previous_cpf,
            previous_issue_date: row
                .previous_issue_date
                .as_deref()
                .map(text_to_day)
                .transpose()?,
            created_at: row.created_at,
        })
    }
}

/// One row of the `profiles` table, in schema column order.
#[derive(Debug, Clone, Queryable)]
pub struct ProfileRow {
    pub profile_id: i64,
    pub user_id: i64,
    pub name: String,
    pub cpf: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = PersistenceError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let cpf: Cpf = Cpf::parse(&row.cpf).map_err(|_| corrupt("cpf", &row.cpf))?;
        Ok(Self {
            id: row.profile_id,
            user_id: row.user_id,
            name: row.name,
            cpf,
        })
    }
}

fn corrupt(column: &str, value: &str) -> PersistenceError {
    PersistenceError::CorruptRecord(format!("invalid stored {column}: {value}"))
}
