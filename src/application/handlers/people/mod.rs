//! People handlers.

mod import_users;

pub use import_users::{ImportUsersCommand, ImportUsersHandler};
