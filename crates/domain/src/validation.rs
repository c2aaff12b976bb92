// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Minimum beneficiary name length, in characters after trimming.
pub const NAME_MIN_CHARS: usize = 4;

/// Maximum beneficiary name length, in characters after trimming.
pub const NAME_MAX_CHARS: usize = 60;

/// Validates a beneficiary name.
///
/// Names are 4 to 60 characters after trimming and may contain letters
/// (accented included), spaces, hyphens, and apostrophes.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` describing the violated rule.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    let length: usize = trimmed.chars().count();

    if length < NAME_MIN_CHARS || length > NAME_MAX_CHARS {
        return Err(DomainError::InvalidName(format!(
            "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
        )));
    }

    let valid = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '-'));
    if !valid {
        return Err(DomainError::InvalidName(String::from(
            "name may only contain letters, spaces, hyphens, and apostrophes",
        )));
    }

    Ok(())
}
