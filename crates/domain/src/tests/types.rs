// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Cpf, Program, Status};
use std::str::FromStr;

#[test]
fn test_program_string_round_trip() {
    let programs = vec![Program::Latam, Program::Smiles, Program::Azul];

    for program in programs {
        let s = program.as_str();
        match Program::from_str(s) {
            Ok(parsed) => assert_eq!(program, parsed),
            Err(e) => panic!("Failed to parse program string: {s}: {e}"),
        }
    }
}

#[test]
fn test_invalid_program_string() {
    assert!(Program::from_str("GOL").is_err());
    assert!(Program::from_str("latam").is_err());
    assert!(Program::from_str("").is_err());
}

#[test]
fn test_program_slot_limits() {
    assert_eq!(Program::Latam.slot_limit(), 25);
    assert_eq!(Program::Smiles.slot_limit(), 25);
    assert_eq!(Program::Azul.slot_limit(), 5);
}

#[test]
fn test_status_string_round_trip() {
    let statuses = vec![Status::Used, Status::Released, Status::Pending];

    for status in statuses {
        let s = status.as_str();
        match Status::from_str(s) {
            Ok(parsed) => assert_eq!(status, parsed),
            Err(e) => panic!("Failed to parse status string: {s}: {e}"),
        }
    }
}

#[test]
fn test_invalid_status_string() {
    assert!(Status::from_str("UTILIZADO").is_err());
    assert!(Status::from_str("active").is_err());
}

#[test]
fn test_program_serde_uses_uppercase() {
    let json = serde_json::to_string(&Program::Azul).expect("serialize program");
    assert_eq!(json, "\"AZUL\"");

    let parsed: Program = serde_json::from_str("\"SMILES\"").expect("deserialize program");
    assert_eq!(parsed, Program::Smiles);
}

#[test]
fn test_status_serde_uses_snake_case() {
    let json = serde_json::to_string(&Status::Released).expect("serialize status");
    assert_eq!(json, "\"released\"");
}

#[test]
fn test_cpf_accepts_eleven_digits() {
    let cpf = Cpf::parse("12345678901").expect("valid cpf");
    assert_eq!(cpf.value(), "12345678901");
}

#[test]
fn test_cpf_rejects_bad_formats() {
    assert!(Cpf::parse("1234567890").is_err()); // too short
    assert!(Cpf::parse("123456789012").is_err()); // too long
    assert!(Cpf::parse("123.456.789-01").is_err()); // punctuation
    assert!(Cpf::parse("1234567890a").is_err()); // letter
    assert!(Cpf::parse("").is_err());
}

#[test]
fn test_cpf_serde_is_transparent() {
    let cpf = Cpf::parse("12345678901").expect("valid cpf");
    let json = serde_json::to_string(&cpf).expect("serialize cpf");
    assert_eq!(json, "\"12345678901\"");
}
