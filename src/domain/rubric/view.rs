//! Grouped read model of a rubric: track → pillar → criterion.

use std::collections::BTreeMap;

use serde::Serialize;

use super::taxonomy::{Pillar, Track};
use crate::domain::foundation::{CriterionId, PillarId, TrackId, Weight};

/// A rubric row joined with the taxonomy names needed for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RubricLine {
    pub track: Track,
    pub pillar: Pillar,
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    pub weight: Weight,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionWeight {
    pub criterion_id: CriterionId,
    pub name: String,
    pub weight: Weight,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarRubric {
    pub pillar_id: PillarId,
    pub name: String,
    pub criteria: Vec<CriterionWeight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRubric {
    pub track_id: TrackId,
    pub name: String,
    pub pillars: Vec<PillarRubric>,
}

impl TrackRubric {
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionWeight> {
        self.pillars.iter().flat_map(|p| p.criteria.iter())
    }
}

/// Rubric grouped by track, pillar and criterion, each level sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RubricView {
    pub tracks: Vec<TrackRubric>,
}

type PillarBucket = (Pillar, Vec<CriterionWeight>);

impl RubricView {
    pub fn from_lines(lines: impl IntoIterator<Item = RubricLine>) -> Self {
        let mut tracks: BTreeMap<(String, TrackId), BTreeMap<(String, PillarId), PillarBucket>> =
            BTreeMap::new();

        for line in lines {
            let pillars = tracks
                .entry((line.track.name.clone(), line.track.id))
                .or_default();
            let (_, criteria) = pillars
                .entry((line.pillar.name.clone(), line.pillar.id))
                .or_insert_with(|| (line.pillar.clone(), Vec::new()));
            criteria.push(CriterionWeight {
                criterion_id: line.criterion_id,
                name: line.criterion_name,
                weight: line.weight,
                is_active: line.is_active,
            });
        }

        let tracks = tracks
            .into_iter()
            .map(|((name, track_id), pillars)| TrackRubric {
                track_id,
                name,
                pillars: pillars
                    .into_values()
                    .map(|(pillar, mut criteria)| {
                        criteria.sort_by(|a, b| {
                            a.name.cmp(&b.name).then(a.criterion_id.cmp(&b.criterion_id))
                        });
                        PillarRubric {
                            pillar_id: pillar.id,
                            name: pillar.name,
                            criteria,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { tracks }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, track_id: TrackId) -> Option<&TrackRubric> {
        self.tracks.iter().find(|t| t.track_id == track_id)
    }

    /// Drops inactive criteria and any pillar or track left empty.
    pub fn active_only(self) -> Self {
        let tracks = self
            .tracks
            .into_iter()
            .filter_map(|mut track| {
                track.pillars = track
                    .pillars
                    .into_iter()
                    .filter_map(|mut pillar| {
                        pillar.criteria.retain(|c| c.is_active);
                        (!pillar.criteria.is_empty()).then_some(pillar)
                    })
                    .collect();
                (!track.pillars.is_empty()).then_some(track)
            })
            .collect();
        Self { tracks }
    }
}
