//! Cycle aggregate - a named evaluation window with a terminal flag.
//!
//! Whether a cycle is active is never stored. It is derived from the window,
//! the `done` flag and the instant supplied by the caller.

use crate::domain::foundation::{
    require_text, CycleId, DomainError, ErrorCode, Timestamp,
};

use super::{CyclePhase, CycleWindow};

/// Validated input for creating a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCycle {
    pub name: String,
    pub description: Option<String>,
    pub window: CycleWindow,
}

impl NewCycle {
    pub fn new(
        name: &str,
        description: Option<String>,
        window: CycleWindow,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_text("name", name)?,
            description: normalize_description(description),
            window,
        })
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// The cycle aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleConfig {
    id: CycleId,
    name: String,
    description: Option<String>,
    window: CycleWindow,
    done: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl CycleConfig {
    /// Builds a freshly persisted cycle.
    pub fn create(id: CycleId, new: NewCycle, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            window: new.window,
            done: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a cycle from persisted data.
    pub fn reconstitute(
        id: CycleId,
        name: String,
        description: Option<String>,
        window: CycleWindow,
        done: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            window,
            done,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn window(&self) -> CycleWindow {
        self.window
    }

    pub fn start_date(&self) -> Timestamp {
        self.window.start()
    }

    pub fn end_date(&self) -> Timestamp {
        self.window.end()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ───────────────────────────────────────────────────────────────
    // Derived state
    // ───────────────────────────────────────────────────────────────

    /// True iff not finalized and `start <= now <= end`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.done && self.window.contains(now)
    }

    pub fn phase(&self, now: Timestamp) -> CyclePhase {
        if self.done {
            CyclePhase::Done
        } else if now.is_before(&self.window.start()) {
            CyclePhase::Upcoming
        } else if now.is_after(&self.window.end()) {
            CyclePhase::Elapsed
        } else {
            CyclePhase::Active
        }
    }

    /// Fails when the cycle no longer accepts changes.
    pub fn ensure_not_done(&self) -> Result<(), DomainError> {
        if self.done {
            return Err(DomainError::new(
                ErrorCode::CycleFinalized,
                format!("Cycle '{}' is already finalized", self.name),
            )
            .with_detail("cycle_id", self.id.to_string()));
        }
        Ok(())
    }

    /// Fails unless evaluations can be submitted right now.
    pub fn ensure_active(&self, now: Timestamp) -> Result<(), DomainError> {
        if !self.is_active(now) {
            return Err(DomainError::new(
                ErrorCode::CycleNotActive,
                format!("Cycle '{}' is not active ({})", self.name, self.phase(now)),
            )
            .with_detail("cycle_id", self.id.to_string()));
        }
        Ok(())
    }

    /// Fails if the cycle is finalized or has not started.
    pub fn ensure_open_for_committee(&self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_not_done()?;
        self.ensure_started(now)
    }

    fn ensure_started(&self, now: Timestamp) -> Result<(), DomainError> {
        if now.is_before(&self.window.start()) {
            return Err(DomainError::new(
                ErrorCode::CycleNotStarted,
                format!("Cycle '{}' has not started yet", self.name),
            )
            .with_detail("cycle_id", self.id.to_string()));
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Applies a partial update. Name uniqueness is the caller's concern.
    pub fn apply_changes(&mut self, changes: CycleChanges, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_not_done()?;

        let name = match changes.name {
            Some(name) => require_text("name", &name)?,
            None => self.name.clone(),
        };
        let window = CycleWindow::new(
            changes.start.unwrap_or(self.window.start()),
            changes.end.unwrap_or(self.window.end()),
        )?;

        self.name = name;
        if changes.description.is_some() {
            self.description = normalize_description(changes.description);
        }
        self.window = window;
        self.updated_at = now;
        Ok(())
    }

    /// Moves the end date later. Nothing else changes.
    pub fn extend(&mut self, new_end: Timestamp, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_not_done()?;

        if !new_end.is_after(&now) {
            return Err(DomainError::validation(
                "end_date",
                "New end date must be after the current date",
            ));
        }
        if !new_end.is_after(&self.window.end()) {
            return Err(DomainError::validation(
                "end_date",
                "New end date must be after the current end date",
            ));
        }

        self.window = self.window.with_end(new_end)?;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the cycle as done. Its data is kept.
    pub fn finalize(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_not_done()?;
        self.ensure_started(now)?;
        self.done = true;
        self.updated_at = now;
        Ok(())
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
