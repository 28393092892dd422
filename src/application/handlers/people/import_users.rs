//! ImportUsersHandler - normalizes rows read from an import sheet.
//!
//! Reading the sheet and persisting users happen outside this crate.

use crate::domain::people::{normalize_rows, ImportOutcome, ImportRow};

#[derive(Debug, Clone, Default)]
pub struct ImportUsersCommand {
    pub rows: Vec<ImportRow>,
}

pub struct ImportUsersHandler {
    email_domain: String,
}

impl ImportUsersHandler {
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            email_domain: email_domain.into(),
        }
    }

    pub fn handle(&self, cmd: ImportUsersCommand) -> ImportOutcome {
        let received = cmd.rows.len();
        let outcome = normalize_rows(cmd.rows, &self.email_domain);

        tracing::info!(
            received,
            accepted = outcome.users.len(),
            rejected = outcome.rejected.len(),
            duplicates = outcome.duplicates.len(),
            "User import normalized"
        );
        for row in &outcome.rejected {
            tracing::warn!(index = row.index, reason = %row.reason, "Import row rejected");
        }
        outcome
    }
}
