//! Normalization of bulk user imports.
//!
//! Spreadsheet reading happens elsewhere; this module receives raw rows and
//! fills in missing emails or names, then drops duplicate emails.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Role;
use crate::domain::foundation::ValidationError;

/// A row as read from an import sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportRow {
    pub email: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub track: Option<String>,
    pub unit: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedUser {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub track: Option<String>,
    pub unit: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Zero-based position in the input.
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub users: Vec<ImportedUser>,
    pub rejected: Vec<RejectedRow>,
    /// Emails skipped because an earlier row used them.
    pub duplicates: Vec<String>,
}

/// Builds an email from a display name: `"João da Silva"` → `joao-da-silva@<domain>`.
pub fn derive_email(name: &str, domain: &str) -> Result<String, ValidationError> {
    let folded: String = name
        .to_lowercase()
        .chars()
        .map(strip_diacritic)
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let local = folded.split_whitespace().collect::<Vec<_>>().join("-");
    if local.is_empty() {
        return Err(ValidationError::invalid_format(
            "name",
            format!("'{}' has no letters to build an email from", name),
        ));
    }
    Ok(format!("{}@{}", local, domain))
}

/// Builds a display name from an email: `"ana.souza@x"` → `Ana Souza`.
pub fn derive_name(email: &str) -> Result<String, ValidationError> {
    let local = email.split('@').next().unwrap_or_default();
    let name = local
        .split('.')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return Err(ValidationError::invalid_format(
            "email",
            format!("'{}' has no local part to build a name from", email),
        ));
    }
    Ok(name)
}

/// Completes and deduplicates rows; the first row wins for a given email.
pub fn normalize_rows(rows: Vec<ImportRow>, domain: &str) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        match normalize_row(row, domain) {
            Ok(user) => {
                if seen.insert(user.email.to_lowercase()) {
                    outcome.users.push(user);
                } else {
                    outcome.duplicates.push(user.email);
                }
            }
            Err(err) => outcome.rejected.push(RejectedRow {
                index,
                reason: err.to_string(),
            }),
        }
    }

    outcome
}

fn normalize_row(row: ImportRow, domain: &str) -> Result<ImportedUser, ValidationError> {
    let email = non_blank(row.email);
    let name = non_blank(row.name);

    let (name, email) = match (name, email) {
        (Some(name), Some(email)) => (name, email),
        (Some(name), None) => {
            let email = derive_email(&name, domain)?;
            (name, email)
        }
        (None, Some(email)) => (derive_name(&email)?, email),
        (None, None) => return Err(ValidationError::empty_field("email")),
    };

    let role = non_blank(row.role).map(|r| r.parse::<Role>()).transpose()?;

    Ok(ImportedUser {
        name,
        email,
        position: non_blank(row.position),
        track: non_blank(row.track),
        unit: non_blank(row.unit),
        role,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Latin-1 and Latin Extended-A letters seen in Portuguese and Spanish names.
fn strip_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}
