//! Exit codes of the `bewerter` binary. Part of the public contract.
//!
//! Rejected evaluations exit with [`bewerter_core::GradeError::exit_code`]:
//! 1 for invalid input (unknown variant, empty text, unknown backend) and
//! 3 when the selected backend failed (see `fallback` in the body).

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // Config error or unexpected fault
