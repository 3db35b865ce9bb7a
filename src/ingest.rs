use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::models::{parse_survey_date, SurveyResponse, SurveyType};

/// One row of a normalized survey export: plain field-named columns, one
/// response per row. Blank or missing columns deserialize as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotRow {
    response_id: Option<String>,
    survey_type: Option<i32>,
    project_title: Option<String>,
    mentor_choice: Option<i32>,
    mentor_name: Option<String>,
    topics_working_on: Option<i32>,
    topics_worked_on: Option<i32>,
    end_date: Option<String>,
    rating_onboarding: Option<i32>,
    rating_initiation: Option<i32>,
    rating_mentorship: Option<i32>,
    rating_team: Option<i32>,
    rating_communications: Option<i32>,
    rating_expectations: Option<i32>,
    rating_sponsor: Option<i32>,
    rating_workload: Option<i32>,
    recommend_asc: Option<i32>,
    confidence_job_placement: Option<i32>,
    hard_skills_improved: Option<i32>,
    soft_skills_improved: Option<i32>,
}

impl SnapshotRow {
    fn into_response(self) -> Option<SurveyResponse> {
        let survey_type = SurveyType::from_code(i64::from(self.survey_type?))?;

        Some(SurveyResponse {
            response_id: self.response_id.unwrap_or_default(),
            survey_type,
            project_title: self.project_title.filter(|title| !title.trim().is_empty()),
            mentor_choice: self.mentor_choice,
            mentor_name: self.mentor_name.filter(|name| !name.trim().is_empty()),
            topics_working_on: self.topics_working_on,
            topics_worked_on: self.topics_worked_on,
            end_date: self.end_date.as_deref().and_then(parse_survey_date),
            rating_onboarding: self.rating_onboarding,
            rating_initiation: self.rating_initiation,
            rating_mentorship: self.rating_mentorship,
            rating_team: self.rating_team,
            rating_communications: self.rating_communications,
            rating_expectations: self.rating_expectations,
            rating_sponsor: self.rating_sponsor,
            rating_workload: self.rating_workload,
            recommend_asc: self.recommend_asc,
            confidence_job_placement: self.confidence_job_placement,
            hard_skills_improved: self.hard_skills_improved,
            soft_skills_improved: self.soft_skills_improved,
        })
    }
}

/// Load a session snapshot from a CSV export instead of the API. Rows with
/// an unknown survey type are skipped, matching the ingestion rule at the
/// HTTP boundary.
pub fn read_snapshot(path: &Path) -> anyhow::Result<Vec<SurveyResponse>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open snapshot {}", path.display()))?;
    collect_rows(reader)
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<SurveyResponse>> {
    let mut responses = Vec::new();
    for row in reader.deserialize::<SnapshotRow>() {
        let row = row.context("malformed snapshot row")?;
        if let Some(response) = row.into_response() {
            responses.push(response);
        }
    }
    Ok(responses)
}
