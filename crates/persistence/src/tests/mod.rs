// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::Persistence;
use chrono::NaiveDate;
use fideliza_domain::{Cpf, NewBeneficiary, Profile, Program, Status};

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn cpf(digits: &str) -> Cpf {
    Cpf::parse(digits).unwrap()
}

/// Fresh in-memory database with one profile for user 10.
pub fn setup() -> (Persistence, Profile) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let profile = persistence
        .insert_profile(10, "Main Traveler", &cpf("00000000000"))
        .expect("profile insert");
    (persistence, profile)
}

pub fn new_record(
    profile_id: i64,
    program: Program,
    cpf_digits: &str,
    issue_date: NaiveDate,
) -> NewBeneficiary {
    NewBeneficiary {
        profile_id,
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
