// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory repository and fixtures shared by the core tests.

use crate::repository::{BeneficiaryRepository, RepositoryError};
use chrono::NaiveDate;
use fideliza_domain::{Beneficiary, Cpf, NewBeneficiary, Profile, Program, Status};

pub const OWNER_ID: i64 = 10;
pub const PROFILE_ID: i64 = 1;

/// A `Vec`-backed repository honoring the same contract the SQL
/// implementation does: newest-first listings and a uniqueness
/// constraint on (profile, program, CPF).
pub struct MemoryRepository {
    pub profiles: Vec<Profile>,
    pub beneficiaries: Vec<Beneficiary>,
    next_id: i64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            profiles: vec![Profile {
                id: PROFILE_ID,
                user_id: OWNER_ID,
                name: String::from("Main Traveler"),
                cpf: cpf("00000000000"),
            }],
            beneficiaries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_profile(&mut self, id: i64, user_id: i64) {
        self.profiles.push(Profile {
            id,
            user_id,
            name: format!("Profile {id}"),
            cpf: cpf("00000000000"),
        });
    }

    /// Inserts a record directly, bypassing the service rules.
    pub fn seed(&mut self, record: NewBeneficiary) -> Beneficiary {
        self.insert_beneficiary(record).expect("seed insert failed")
    }
}

impl BeneficiaryRepository for MemoryRepository {
    fn find_profile(&mut self, profile_id: i64) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.iter().find(|p| p.id == profile_id).cloned())
    }

    fn find_beneficiary(&mut self, id: i64) -> Result<Option<Beneficiary>, RepositoryError> {
        Ok(self.beneficiaries.iter().find(|b| b.id == id).cloned())
    }

    fn list_beneficiaries(
        &mut self,
        profile_id: i64,
        program: Option<Program>,
    ) -> Result<Vec<Beneficiary>, RepositoryError> {
        let mut records: Vec<Beneficiary> = self
            .beneficiaries
            .iter()
            .filter(|b| b.profile_id == profile_id)
            .filter(|b| program.is_none_or(|p| b.program == p))
            .cloned()
            .collect();
        records.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(records)
    }

    fn find_by_cpf(
        &mut self,
        profile_id: i64,
        program: Program,
        cpf: &Cpf,
    ) -> Result<Option<Beneficiary>, RepositoryError> {
        Ok(self
            .beneficiaries
            .iter()
            .find(|b| b.profile_id == profile_id && b.program == program && b.cpf == *cpf)
            .cloned())
    }

    fn find_substitute(
        &mut self,
        profile_id: i64,
        previous_cpf: &Cpf,
        change_date: NaiveDate,
    ) -> Result<Option<Beneficiary>, RepositoryError> {
        Ok(self
            .beneficiaries
            .iter()
            .find(|b| {
                b.profile_id == profile_id
                    && b.program == Program::Azul
                    && b.previous_cpf.as_ref() == Some(previous_cpf)
                    && b.change_date == Some(change_date)
            })
            .cloned())
    }

    fn count_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<u32, RepositoryError> {
        let count = self
            .beneficiaries
            .iter()
            .filter(|b| b.profile_id == profile_id && b.program == program)
            .count();
        Ok(u32::try_from(count).unwrap())
    }

    fn count_in_window(
        &mut self,
        profile_id: i64,
        program: Program,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, RepositoryError> {
        let count = self
            .beneficiaries
            .iter()
            .filter(|b| {
                b.profile_id == profile_id
                    && b.program == program
                    && b.issue_date >= start
                    && b.issue_date <= end
            })
            .count();
        Ok(u32::try_from(count).unwrap())
    }

    fn insert_beneficiary(
        &mut self,
        beneficiary: NewBeneficiary,
    ) -> Result<Beneficiary, RepositoryError> {
        let clash = self.beneficiaries.iter().any(|b| {
            b.profile_id == beneficiary.profile_id
                && b.program == beneficiary.program
                && b.cpf == beneficiary.cpf
        });
        if clash {
            return Err(RepositoryError::UniqueViolation {
                detail: format!("cpf {} already enrolled", beneficiary.cpf.value()),
            });
        }

        let record = Beneficiary {
            id: self.next_id,
            profile_id: beneficiary.profile_id,
            program: beneficiary.program,
            name: beneficiary.name,
            cpf: beneficiary.cpf,
            issue_date: beneficiary.issue_date,
            status: beneficiary.status,
            change_date: beneficiary.change_date,
            previous_name: beneficiary.previous_name,
            previous_cpf: beneficiary.previous_cpf,
            previous_issue_date: beneficiary.previous_issue_date,
            created_at: String::from("2026-01-01 12:00:00"),
        };
        self.next_id += 1;
        self.beneficiaries.push(record.clone());
        Ok(record)
    }

    fn update_beneficiary(&mut self, beneficiary: &Beneficiary) -> Result<(), RepositoryError> {
        let slot = self
            .beneficiaries
            .iter_mut()
            .find(|b| b.id == beneficiary.id)
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("beneficiary {}", beneficiary.id))
            })?;
        *slot = beneficiary.clone();
        Ok(())
    }

    fn delete_beneficiary(&mut self, id: i64) -> Result<(), RepositoryError> {
        let before = self.beneficiaries.len();
        self.beneficiaries.retain(|b| b.id != id);
        if self.beneficiaries.len() == before {
            return Err(RepositoryError::NotFound(format!("beneficiary {id}")));
        }
        Ok(())
    }

    fn delete_all_for_program(
        &mut self,
        profile_id: i64,
        program: Program,
    ) -> Result<usize, RepositoryError> {
        let before = self.beneficiaries.len();
        self.beneficiaries
            .retain(|b| !(b.profile_id == profile_id && b.program == program));
        Ok(before - self.beneficiaries.len())
    }
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn cpf(digits: &str) -> Cpf {
    Cpf::parse(digits).unwrap()
}

pub fn new_record(program: Program, cpf_digits: &str, issue_date: NaiveDate) -> NewBeneficiary {
    NewBeneficiary {
        profile_id: PROFILE_ID,
        program,
        name: String::from("Maria Silva"),
        cpf: cpf(cpf_digits),
        issue_date,
        status: Status::Used,
        change_date: None,
        previous_name: None,
        previous_cpf: None,
        previous_issue_date: None,
    }
}
