// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod error;
mod slots;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{BRAZIL_TZ, add_years, brazil_day, days_between, jan_first, parse_day, today};
pub use error::DomainError;
pub use slots::{available_slots, enrollment_window};
pub use status::{ORPHAN_REMOVAL_DAYS, QUARANTINE_DAYS, compute_status};

// Re-export public types
pub use types::{Beneficiary, Cpf, NewBeneficiary, Profile, Program, Status};
pub use validation::{NAME_MAX_CHARS, NAME_MIN_CHARS, validate_name};
