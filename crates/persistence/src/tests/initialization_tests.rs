// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for database initialization and isolation.

use crate::Persistence;
use fideliza_core::BeneficiaryRepository;
use fideliza_domain::Program;

use super::{day, new_record, setup};

#[test]
fn test_new_in_memory_initializes_schema() {
    let (mut persistence, profile) = setup();

    let found = persistence
        .repository()
        .find_profile(profile.id)
        .unwrap()
        .unwrap();

    assert_eq!(found.user_id, 10);
    assert_eq!(found.name, "Main Traveler");
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let (mut first, profile) = setup();
    first
        .repository()
        .insert_beneficiary(new_record(
            profile.id,
            Program::Latam,
            "52998224725",
            day(2025, 1, 1),
        ))
        .unwrap();

    let mut second = Persistence::new_in_memory().expect("in-memory database");

    assert!(second.repository().find_profile(profile.id).unwrap().is_none());
}

#[test]
fn test_new_with_file_opens_and_migrates() {
    let dir = std::env::temp_dir().join(format!("fideliza_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fideliza.db");

    {
        let mut persistence = Persistence::new_with_file(&path).expect("file database");
        persistence
            .insert_profile(10, "Main Traveler", &super::cpf("00000000000"))
            .unwrap();
    }

    // Reopening sees the persisted row and reruns no migrations.
    let mut reopened = Persistence::new_with_file(&path).expect("reopen file database");
    let found = reopened.repository().find_profile(1).unwrap();
    assert!(found.is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}
