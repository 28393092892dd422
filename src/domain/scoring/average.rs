//! Averaging primitives shared by every summary.

use std::collections::HashMap;

use crate::domain::evaluation::{EvaluationPayload, EvaluationRecord, SourceKind};
use crate::domain::foundation::UserId;
use serde::Serialize;

/// Arithmetic mean; `None` when there is nothing to average.
pub fn average_of(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Rounds half away from zero to the given number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Per-source averages for one collaborator in one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAverages {
    pub self_assessment: Option<f64>,
    pub peer: Option<f64>,
    pub mentoring: Option<f64>,
    /// Mean of each manager evaluation's own criterion mean.
    pub manager: Option<f64>,
    pub leader: Option<f64>,
}

impl SourceAverages {
    /// Averages the completed records written about `evaluatee`.
    ///
    /// Records about other people are ignored.
    pub fn for_evaluatee<'a>(
        evaluatee: UserId,
        records: impl IntoIterator<Item = &'a EvaluationRecord>,
    ) -> Self {
        let mut by_kind: HashMap<SourceKind, Vec<f64>> = HashMap::new();
        let mut manager_means: Vec<f64> = Vec::new();

        for record in records {
            if record.header.evaluatee_id() != evaluatee {
                continue;
            }
            let Some(payload) = &record.payload else {
                continue;
            };
            match payload {
                EvaluationPayload::Manager(_) => {
                    if let Some(mean) = average_of(&payload.scores()) {
                        manager_means.push(mean);
                    }
                }
                EvaluationPayload::SelfAssessment(_) if record.header.evaluator_id() != evaluatee => {}
                _ => by_kind.entry(payload.kind()).or_default().extend(payload.scores()),
            }
        }

        let avg = |kind: SourceKind| by_kind.get(&kind).and_then(|s| average_of(s));

        Self {
            self_assessment: avg(SourceKind::SelfAssessment),
            peer: avg(SourceKind::Peer360),
            mentoring: avg(SourceKind::Mentoring),
            manager: average_of(&manager_means),
            leader: avg(SourceKind::Leader),
        }
    }

    /// Manager score, or the leader's when no manager evaluated.
    pub fn manager_or_leader(&self) -> Option<f64> {
        self.manager.or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::{
        Evaluation, EvaluationKey, ManagerItem, PeerReview, SelfAssessmentItem,
    };
    use crate::domain::foundation::{CriterionId, CycleId, EvaluationId, PillarId, Score, Timestamp};
    use proptest::prelude::*;

    fn score(v: i64) -> Score {
        Score::try_new(v).unwrap()
    }

    fn record(evaluator: i64, evaluatee: i64, payload: EvaluationPayload) -> EvaluationRecord {
        let key = EvaluationKey::new(
            UserId::from_raw(evaluator),
            UserId::from_raw(evaluatee),
            CycleId::from_raw(1),
            payload.kind(),
        )
        .unwrap();
        let mut rec = EvaluationRecord::pending(Evaluation::new(EvaluationId::from_raw(evaluator * 100 + evaluatee), key, Timestamp::now()));
        rec.attach(payload).unwrap();
        rec
    }

    fn self_assessment(user: i64, scores: &[i64]) -> EvaluationRecord {
        let items = scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                SelfAssessmentItem::new(PillarId::from_raw(1), CriterionId::from_raw(i as i64 + 1), score(*s), "j").unwrap()
            })
            .collect();
        record(user, user, EvaluationPayload::SelfAssessment(items))
    }

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average_of(&[]), None);
    }

    #[test]
    fn average_of_known_values() {
        assert_eq!(average_of(&[5.0, 5.0]), Some(5.0));
        assert_eq!(average_of(&[4.0, 6.0]), Some(5.0));
    }

    #[test]
    fn average_of_zeros_is_zero_not_none() {
        assert_eq!(average_of(&[0.0, 0.0]), Some(0.0));
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round_to(4.333, 1), 4.3);
        assert_eq!(round_to(4.25, 1), 4.3);
        assert_eq!(round_to(2.0, 1), 2.0);
    }

    #[test]
    fn self_assessment_only_gives_null_manager() {
        let records = vec![self_assessment(7, &[4, 4, 5])];
        let avg = SourceAverages::for_evaluatee(UserId::from_raw(7), &records);

        let self_avg = avg.self_assessment.unwrap();
        assert!((self_avg - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(avg.manager, None);
        assert_eq!(avg.peer, None);
    }

    #[test]
    fn manager_average_is_mean_of_each_evaluation_mean() {
        let manager = |evaluator: i64, scores: &[i64]| {
            let items = scores
                .iter()
                .enumerate()
                .map(|(i, s)| ManagerItem::new(CriterionId::from_raw(i as i64 + 1), score(*s), "j").unwrap())
                .collect();
            record(evaluator, 7, EvaluationPayload::Manager(items))
        };
        let records = vec![manager(1, &[5, 5, 5, 5]), manager(2, &[1])];

        let avg = SourceAverages::for_evaluatee(UserId::from_raw(7), &records);

        assert_eq!(avg.manager, Some(3.0));
    }

    #[test]
    fn peer_scores_only_count_for_their_evaluatee() {
        let peer = |evaluator: i64, evaluatee: i64, s: i64| {
            record(evaluator, evaluatee, EvaluationPayload::Peer360(PeerReview::new(score(s), "a", "b").unwrap()))
        };
        let records = vec![peer(1, 7, 4), peer(2, 7, 2), peer(3, 8, 5)];

        let avg = SourceAverages::for_evaluatee(UserId::from_raw(7), &records);

        assert_eq!(avg.peer, Some(3.0));
    }

    #[test]
    fn manager_or_leader_falls_back() {
        let avg = SourceAverages {
            leader: Some(4.0),
            ..Default::default()
        };
        assert_eq!(avg.manager_or_leader(), Some(4.0));
    }

    proptest! {
        #[test]
        fn average_lies_between_min_and_max(scores in proptest::collection::vec(1u8..=5, 1..50)) {
            let values: Vec<f64> = scores.iter().map(|s| f64::from(*s)).collect();
            let avg = average_of(&values).unwrap();
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
        }
    }
}
