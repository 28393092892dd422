//! People module - users, roles, and import normalization.

mod import;
mod user;

pub use import::{derive_email, derive_name, normalize_rows, ImportOutcome, ImportRow, ImportedUser, RejectedRow};
pub use user::{Role, UserProfile};
