//! A collaborator's self-assessment average across cycles.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::average_of;
use crate::domain::cycle::CycleConfig;
use crate::domain::foundation::{CycleId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionPoint {
    pub cycle_id: CycleId,
    pub cycle_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub self_assessment_average: Option<f64>,
}

#[derive(Debug, Clone)]
struct EvolutionEntry {
    cycle_id: CycleId,
    cycle_name: String,
    start_date: Timestamp,
    end_date: Timestamp,
    scores: Vec<f64>,
}

/// Finite, restartable sequence of points in chronological order.
///
/// Averages are computed while iterating; each call to [`Evolution::iter`]
/// starts over from the first cycle.
#[derive(Debug, Clone, Default)]
pub struct Evolution {
    entries: Vec<EvolutionEntry>,
}

impl Evolution {
    /// Orders cycles by start date, then id. Cycles without scores yield `None`.
    pub fn new(cycles: &[CycleConfig], mut scores_by_cycle: HashMap<CycleId, Vec<f64>>) -> Self {
        let mut entries: Vec<EvolutionEntry> = cycles
            .iter()
            .map(|c| EvolutionEntry {
                cycle_id: c.id(),
                cycle_name: c.name().to_string(),
                start_date: c.start_date(),
                end_date: c.end_date(),
                scores: scores_by_cycle.remove(&c.id()).unwrap_or_default(),
            })
            .collect();
        entries.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.cycle_id.cmp(&b.cycle_id)));
        Self { entries }
    }

    pub fn iter(&self) -> EvolutionIter<'_> {
        EvolutionIter {
            inner: self.entries.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct EvolutionIter<'a> {
    inner: std::slice::Iter<'a, EvolutionEntry>,
}

impl Iterator for EvolutionIter<'_> {
    type Item = EvolutionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| EvolutionPoint {
            cycle_id: e.cycle_id,
            cycle_name: e.cycle_name.clone(),
            start_date: e.start_date,
            end_date: e.end_date,
            self_assessment_average: average_of(&e.scores),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for EvolutionIter<'_> {}

impl<'a> IntoIterator for &'a Evolution {
    type Item = EvolutionPoint;
    type IntoIter = EvolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Evolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use chrono::{TimeZone, Utc};

    fn cycle(id: i64, name: &str, month: u32) -> CycleConfig {
        let start = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap());
        let window = CycleWindow::new(start, start.plus_days(20)).unwrap();
        CycleConfig::create(CycleId::from_raw(id), NewCycle::new(name, None, window).unwrap(), start)
    }

    fn evolution() -> Evolution {
        let cycles = vec![cycle(2, "2024.2", 8), cycle(1, "2024.1", 2), cycle(3, "2025.1", 11)];
        let mut scores = HashMap::new();
        scores.insert(CycleId::from_raw(1), vec![3.0, 4.0]);
        scores.insert(CycleId::from_raw(2), vec![5.0]);
        Evolution::new(&cycles, scores)
    }

    #[test]
    fn points_are_chronological() {
        let names: Vec<String> = evolution().iter().map(|p| p.cycle_name).collect();
        assert_eq!(names, vec!["2024.1", "2024.2", "2025.1"]);
    }

    #[test]
    fn cycles_without_scores_have_null_average() {
        let points: Vec<EvolutionPoint> = evolution().iter().collect();
        assert_eq!(points[0].self_assessment_average, Some(3.5));
        assert_eq!(points[1].self_assessment_average, Some(5.0));
        assert_eq!(points[2].self_assessment_average, None);
    }

    #[test]
    fn iteration_is_restartable() {
        let evo = evolution();
        let first: Vec<EvolutionPoint> = evo.iter().collect();
        let second: Vec<EvolutionPoint> = (&evo).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(evo.iter().len(), 3);
    }

    #[test]
    fn empty_evolution_serializes_as_empty_list() {
        let evo = Evolution::new(&[], HashMap::new());
        assert!(evo.is_empty());
        assert_eq!(serde_json::to_string(&evo).unwrap(), "[]");
    }
}
