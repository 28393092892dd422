//! Rubric rows: the mutable draft and the per-cycle frozen copy.

use serde::{Deserialize, Serialize};

use super::taxonomy::Criterion;
use crate::domain::foundation::{CriterionId, CycleId, PillarId, TrackId, Weight};

/// Draft rubric row keyed by (track, criterion).
///
/// Describes the rubric that the next cycle will freeze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCriterionWeight {
    pub track_id: TrackId,
    pub criterion_id: CriterionId,
    pub weight: Weight,
    pub is_active: bool,
}

impl TrackCriterionWeight {
    pub fn new(track_id: TrackId, criterion_id: CriterionId, weight: Weight, is_active: bool) -> Self {
        Self {
            track_id,
            criterion_id,
            weight,
            is_active,
        }
    }

    pub fn key(&self) -> (TrackId, CriterionId) {
        (self.track_id, self.criterion_id)
    }
}

/// Frozen rubric row keyed by (cycle, track, criterion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRubricRow {
    pub cycle_id: CycleId,
    pub track_id: TrackId,
    pub criterion_id: CriterionId,
    pub weight: Weight,
    pub is_active: bool,
}

impl CycleRubricRow {
    pub fn key(&self) -> (CycleId, TrackId, CriterionId) {
        (self.cycle_id, self.track_id, self.criterion_id)
    }
}

/// Copies every draft row into a row scoped to `cycle_id`.
///
/// An empty draft produces an empty snapshot.
pub fn snapshot_rows(cycle_id: CycleId, draft: &[TrackCriterionWeight]) -> Vec<CycleRubricRow> {
    draft
        .iter()
        .map(|row| CycleRubricRow {
            cycle_id,
            track_id: row.track_id,
            criterion_id: row.criterion_id,
            weight: row.weight,
            is_active: row.is_active,
        })
        .collect()
}

/// Rows to write when a whole pillar is switched on or off for a track.
///
/// Existing rows of the pillar keep their weight and only flip `is_active`.
/// When the track has no rows for the pillar yet, one zero-weight row per
/// criterion of the pillar is created.
pub fn pillar_activation_rows(
    track_id: TrackId,
    pillar_id: PillarId,
    pillar_criteria: &[Criterion],
    existing: &[TrackCriterionWeight],
    is_active: bool,
) -> Vec<TrackCriterionWeight> {
    let in_pillar: Vec<&TrackCriterionWeight> = existing
        .iter()
        .filter(|row| row.track_id == track_id)
        .filter(|row| {
            pillar_criteria
                .iter()
                .any(|c| c.id == row.criterion_id && c.belongs_to(pillar_id))
        })
        .collect();

    if in_pillar.is_empty() {
        return pillar_criteria
            .iter()
            .filter(|c| c.belongs_to(pillar_id))
            .map(|c| TrackCriterionWeight::new(track_id, c.id, Weight::ZERO, is_active))
            .collect();
    }

    in_pillar
        .into_iter()
        .map(|row| TrackCriterionWeight {
            is_active,
            ..row.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(v: f64) -> Weight {
        Weight::try_new(v).unwrap()
    }

    fn criterion(id: i64, pillar: i64) -> Criterion {
        Criterion {
            id: CriterionId::from_raw(id),
            pillar_id: PillarId::from_raw(pillar),
            name: format!("criterion {}", id),
            description: None,
        }
    }

    #[test]
    fn snapshot_copies_every_draft_row() {
        let draft = vec![
            TrackCriterionWeight::new(TrackId::from_raw(1), CriterionId::from_raw(101), weight(20.0), true),
            TrackCriterionWeight::new(TrackId::from_raw(2), CriterionId::from_raw(102), weight(35.0), false),
        ];

        let rows = snapshot_rows(CycleId::from_raw(9), &draft);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.cycle_id == CycleId::from_raw(9)));
        assert_eq!(rows[0].weight, weight(20.0));
        assert!(!rows[1].is_active);
    }

    #[test]
    fn snapshot_of_empty_draft_is_empty() {
        assert!(snapshot_rows(CycleId::from_raw(1), &[]).is_empty());
    }

    #[test]
    fn pillar_activation_toggles_existing_rows() {
        let track = TrackId::from_raw(1);
        let pillar = PillarId::from_raw(7);
        let criteria = vec![criterion(101, 7), criterion(102, 7)];
        let existing = vec![TrackCriterionWeight::new(track, CriterionId::from_raw(101), weight(40.0), true)];

        let rows = pillar_activation_rows(track, pillar, &criteria, &existing, false);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].weight, weight(40.0));
        assert!(!rows[0].is_active);
    }

    #[test]
    fn pillar_activation_creates_zero_weight_rows_when_none_exist() {
        let track = TrackId::from_raw(1);
        let pillar = PillarId::from_raw(7);
        let criteria = vec![criterion(101, 7), criterion(102, 7)];

        let rows = pillar_activation_rows(track, pillar, &criteria, &[], true);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.weight == Weight::ZERO && r.is_active));
    }

    #[test]
    fn pillar_activation_ignores_rows_of_other_tracks() {
        let pillar = PillarId::from_raw(7);
        let criteria = vec![criterion(101, 7)];
        let other_track = vec![TrackCriterionWeight::new(
            TrackId::from_raw(2),
            CriterionId::from_raw(101),
            weight(10.0),
            true,
        )];

        let rows = pillar_activation_rows(TrackId::from_raw(1), pillar, &criteria, &other_track, true);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].track_id, TrackId::from_raw(1));
        assert_eq!(rows[0].weight, Weight::ZERO);
    }
}
