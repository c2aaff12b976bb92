// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::validate_name;

#[test]
fn test_valid_names() {
    assert!(validate_name("Maria Silva").is_ok());
    assert!(validate_name("José de Alencar").is_ok());
    assert!(validate_name("Ana-Luísa d'Ávila").is_ok());
    assert!(validate_name("João").is_ok());
}

#[test]
fn test_name_too_short() {
    assert!(validate_name("Ana").is_err());
    assert!(validate_name("").is_err());
    // Whitespace does not count toward the length.
    assert!(validate_name("  Ana  ").is_err());
}

#[test]
fn test_name_too_long() {
    let name = "A".repeat(61);
    assert!(validate_name(&name).is_err());

    let name = "A".repeat(60);
    assert!(validate_name(&name).is_ok());
}

#[test]
fn test_name_rejects_digits_and_symbols() {
    assert!(validate_name("Maria 2nd").is_err());
    assert!(validate_name("Maria_Silva").is_err());
    assert!(validate_name("Maria@Silva").is_err());
}

#[test]
fn test_name_length_counts_characters_not_bytes() {
    // Four accented characters are four characters, even at eight bytes.
    assert!(validate_name("Áéíó").is_ok());
}
