//! Organization-wide settings: calendar offset and import email domain.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::OrgCalendar;

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Fixed offset cycle dates are interpreted in, e.g. `-03:00`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Domain used when an imported row only carries a name.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

impl OrganizationConfig {
    pub fn calendar(&self) -> Result<OrgCalendar, ValidationError> {
        OrgCalendar::parse(&self.utc_offset)
            .map_err(|_| ValidationError::InvalidUtcOffset(self.utc_offset.clone()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.calendar()?;
        let domain = self.email_domain.trim();
        if domain.is_empty() || domain.contains('@') || !domain.contains('.') || domain.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidEmailDomain(self.email_domain.clone()));
        }
        Ok(())
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
            email_domain: default_email_domain(),
        }
    }
}

fn default_utc_offset() -> String {
    "-03:00".to_string()
}

fn default_email_domain() -> String {
    "rocket.com".to_string()
}
