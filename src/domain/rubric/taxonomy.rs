//! Static grading taxonomy: tracks, pillars and criteria.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, PillarId, TrackId};

/// A career track; rubrics are configured per track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
}

/// Named group of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: PillarId,
    pub name: String,
}

/// A gradable criterion. Its pillar never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub pillar_id: PillarId,
    pub name: String,
    pub description: Option<String>,
}

impl Criterion {
    pub fn belongs_to(&self, pillar_id: PillarId) -> bool {
        self.pillar_id == pillar_id
    }
}
