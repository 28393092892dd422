//! Flat rows for the cycle export sheet.

use std::collections::HashMap;

use serde::Serialize;

use super::SourceAverages;
use crate::domain::cycle::CycleConfig;
use crate::domain::equalization::Equalization;
use crate::domain::evaluation::{EvaluationRecord, SourceKind};
use crate::domain::foundation::UserId;
use crate::domain::people::UserProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub collaborator_id: UserId,
    pub collaborator_name: String,
    pub track: Option<String>,
    pub project: Option<String>,
    /// Only filled once the cycle is done.
    pub equalization_score: Option<f64>,
    pub committee_justification: Option<String>,
    pub self_assessment_average: Option<f64>,
    /// Manager average, or the leader's score when no manager evaluated.
    pub manager_score: Option<f64>,
    pub peer_average: Option<f64>,
}

/// One row per self-assessment header of the cycle, ordered by name.
pub fn export_rows(
    cycle: &CycleConfig,
    records: &[EvaluationRecord],
    equalizations: &[Equalization],
    users: &HashMap<UserId, UserProfile>,
) -> Vec<ExportRow> {
    let in_cycle: Vec<&EvaluationRecord> = records
        .iter()
        .filter(|r| r.header.cycle_id() == cycle.id())
        .collect();

    let mut rows: Vec<ExportRow> = in_cycle
        .iter()
        .filter(|r| r.header.kind() == SourceKind::SelfAssessment)
        .map(|header| {
            let collaborator = header.header.evaluatee_id();
            let averages = SourceAverages::for_evaluatee(collaborator, in_cycle.iter().copied());
            let user = users.get(&collaborator);
            let equalization = equalizations
                .iter()
                .find(|e| e.evaluation_id == header.header.id);

            ExportRow {
                collaborator_id: collaborator,
                collaborator_name: user
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| format!("#{}", collaborator)),
                track: user.and_then(|u| u.track.as_ref()).map(|t| t.name.clone()),
                project: user.and_then(|u| u.current_project.clone()),
                equalization_score: equalization
                    .filter(|_| cycle.is_done())
                    .map(|e| e.score.value()),
                committee_justification: equalization.map(|e| e.justification.clone()),
                self_assessment_average: averages.self_assessment,
                manager_score: averages.manager_or_leader(),
                peer_average: averages.peer,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.collaborator_name
            .cmp(&b.collaborator_name)
            .then(a.collaborator_id.cmp(&b.collaborator_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::evaluation::{
        Evaluation, EvaluationKey, EvaluationPayload, LeaderReview, SelfAssessmentItem,
    };
    use crate::domain::foundation::{
        CriterionId, CycleId, EqualizationId, EvaluationId, FinalScore, PillarId, Score, Timestamp,
        TrackId,
    };
    use crate::domain::rubric::Track;
    use chrono::{TimeZone, Utc};

    fn ts(day: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 4, day, 0, 0, 0).unwrap())
    }

    fn cycle(done: bool) -> CycleConfig {
        let window = CycleWindow::new(ts(1), ts(20)).unwrap();
        let mut c = CycleConfig::create(CycleId::from_raw(1), NewCycle::new("2025.1", None, window).unwrap(), ts(1));
        if done {
            c.finalize(ts(21)).unwrap();
        }
        c
    }

    fn users() -> HashMap<UserId, UserProfile> {
        let mut map = HashMap::new();
        map.insert(
            UserId::from_raw(7),
            UserProfile {
                id: UserId::from_raw(7),
                name: "Zoe".to_string(),
                email: "zoe@x.io".to_string(),
                position: None,
                track: Some(Track {
                    id: TrackId::from_raw(1),
                    name: "Backend".to_string(),
                }),
                current_project: Some("Apollo".to_string()),
                roles: vec![],
            },
        );
        map
    }

    fn records() -> Vec<EvaluationRecord> {
        let key = EvaluationKey::self_assessment(UserId::from_raw(7), CycleId::from_raw(1));
        let mut own = EvaluationRecord::pending(Evaluation::new(EvaluationId::from_raw(70), key, ts(2)));
        own.attach(EvaluationPayload::SelfAssessment(vec![SelfAssessmentItem::new(
            PillarId::from_raw(1),
            CriterionId::from_raw(1),
            Score::try_new(4).unwrap(),
            "j",
        )
        .unwrap()]))
        .unwrap();

        let key = EvaluationKey::new(UserId::from_raw(3), UserId::from_raw(7), CycleId::from_raw(1), SourceKind::Leader).unwrap();
        let mut leader = EvaluationRecord::pending(Evaluation::new(EvaluationId::from_raw(71), key, ts(2)));
        leader
            .attach(EvaluationPayload::Leader(
                LeaderReview::new(Score::try_new(5).unwrap(), "great", None, None).unwrap(),
            ))
            .unwrap();

        let key = EvaluationKey::self_assessment(UserId::from_raw(8), CycleId::from_raw(1));
        let unknown = EvaluationRecord::pending(Evaluation::new(EvaluationId::from_raw(80), key, ts(2)));

        vec![own, leader, unknown]
    }

    fn equalization() -> Equalization {
        Equalization {
            id: EqualizationId::from_raw(1),
            evaluation_id: EvaluationId::from_raw(70),
            cycle_id: CycleId::from_raw(1),
            collaborator_id: UserId::from_raw(7),
            score: FinalScore::try_new(4.5).unwrap(),
            justification: "agreed".to_string(),
            revision: 0,
            created_at: ts(10),
            updated_at: ts(10),
        }
    }

    #[test]
    fn one_row_per_self_assessment_header() {
        let rows = export_rows(&cycle(false), &records(), &[], &users());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn row_carries_profile_and_averages() {
        let rows = export_rows(&cycle(false), &records(), &[equalization()], &users());
        let zoe = rows.iter().find(|r| r.collaborator_name == "Zoe").unwrap();

        assert_eq!(zoe.track.as_deref(), Some("Backend"));
        assert_eq!(zoe.project.as_deref(), Some("Apollo"));
        assert_eq!(zoe.self_assessment_average, Some(4.0));
        assert_eq!(zoe.manager_score, Some(5.0));
        assert_eq!(zoe.peer_average, None);
        assert_eq!(zoe.committee_justification.as_deref(), Some("agreed"));
    }

    #[test]
    fn equalization_score_hidden_until_cycle_done() {
        let open = export_rows(&cycle(false), &records(), &[equalization()], &users());
        let zoe = open.iter().find(|r| r.collaborator_name == "Zoe").unwrap();
        assert_eq!(zoe.equalization_score, None);

        let done = export_rows(&cycle(true), &records(), &[equalization()], &users());
        let zoe = done.iter().find(|r| r.collaborator_name == "Zoe").unwrap();
        assert_eq!(zoe.equalization_score, Some(4.5));
    }

    #[test]
    fn unknown_collaborator_gets_placeholder_name() {
        let rows = export_rows(&cycle(false), &records(), &[], &users());
        assert!(rows.iter().any(|r| r.collaborator_name == "#8"));
    }
}
