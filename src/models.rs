use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyType {
    /// Submitted when a student begins a mentored project.
    Starting,
    /// Submitted when the project wraps up; carries the rating fields.
    Ending,
}

impl SurveyType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SurveyType::Starting),
            2 => Some(SurveyType::Ending),
            _ => None,
        }
    }
}

/// One submitted survey, immutable once loaded. Optional fields stay `None`
/// when the backend omits or mangles them; they are never defaulted to zero,
/// so averages only ever see values that were actually reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyResponse {
    pub response_id: String,
    pub survey_type: SurveyType,
    pub project_title: Option<String>,
    pub mentor_choice: Option<i32>,
    pub mentor_name: Option<String>,
    pub topics_working_on: Option<i32>,
    pub topics_worked_on: Option<i32>,
    pub end_date: Option<NaiveDate>,
    pub rating_onboarding: Option<i32>,
    pub rating_initiation: Option<i32>,
    pub rating_mentorship: Option<i32>,
    pub rating_team: Option<i32>,
    pub rating_communications: Option<i32>,
    pub rating_expectations: Option<i32>,
    pub rating_sponsor: Option<i32>,
    pub rating_workload: Option<i32>,
    pub recommend_asc: Option<i32>,
    pub confidence_job_placement: Option<i32>,
    pub hard_skills_improved: Option<i32>,
    pub soft_skills_improved: Option<i32>,
}

impl SurveyResponse {
    /// Coerce one loosely typed backend record into the schema. The webhook
    /// that feeds the backend stringifies numbers, so every field is accepted
    /// as either its native type or a numeric string; anything else becomes
    /// absent. Records without a recognizable survey type are dropped.
    pub fn from_value(record: &Value) -> Option<Self> {
        let survey_type = int_field(record, "survey_type").and_then(SurveyType::from_code)?;

        Some(SurveyResponse {
            response_id: text_field(record, "response_id").unwrap_or_default(),
            survey_type,
            project_title: text_field(record, "project_title"),
            mentor_choice: int32_field(record, "mentor_choice"),
            mentor_name: text_field(record, "mentor_name"),
            topics_working_on: int32_field(record, "topics_working_on"),
            topics_worked_on: int32_field(record, "topics_worked_on"),
            end_date: date_field(record, "end_date"),
            rating_onboarding: int32_field(record, "rating_onboarding"),
            rating_initiation: int32_field(record, "rating_initiation"),
            rating_mentorship: int32_field(record, "rating_mentorship"),
            rating_team: int32_field(record, "rating_team"),
            rating_communications: int32_field(record, "rating_communications"),
            rating_expectations: int32_field(record, "rating_expectations"),
            rating_sponsor: int32_field(record, "rating_sponsor"),
            rating_workload: int32_field(record, "rating_workload"),
            recommend_asc: int32_field(record, "recommend_asc"),
            confidence_job_placement: int32_field(record, "confidence_job_placement"),
            hard_skills_improved: int32_field(record, "hard_skills_improved"),
            soft_skills_improved: int32_field(record, "soft_skills_improved"),
        })
    }
}

/// Active filter selection. `None` and empty strings both mean "no constraint
/// on this field"; the accessors below normalize the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub mentor: Option<String>,
    pub topic: Option<String>,
    pub project_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn mentor(&self) -> Option<&str> {
        self.mentor.as_deref().filter(|value| !value.trim().is_empty())
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|value| !value.trim().is_empty())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.mentor().is_none()
            && self.topic().is_none()
            && self.project_name().is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Summary statistics over a filtered response set. `average_ratings` only
/// holds entries for rating fields that had at least one reported value; a
/// missing key means "no data", which is distinct from an average of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedStats {
    pub total_responses: usize,
    pub starting_responses: usize,
    pub ending_responses: usize,
    pub average_ratings: BTreeMap<&'static str, f64>,
    pub average_recommendation: Option<f64>,
    pub completion_rate: f64,
}

/// Raw per-response value lists, in filtered order, no dedup. Averaging and
/// display scaling happen in the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsBundle {
    pub topics_starting: Vec<i32>,
    pub topics_ending: Vec<i32>,
    pub confidence_levels: Vec<i32>,
    pub hard_skills_improvement: Vec<i32>,
    pub soft_skills_improvement: Vec<i32>,
}

/// Filter-widget choices that remain meaningful under the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableOptions {
    pub mentors: Vec<String>,
    pub topics: Vec<String>,
    pub projects: Vec<String>,
}

/// Everything derived from one (snapshot, criteria) pair. Rebuilt whole on
/// every input change, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub stats: DerivedStats,
    pub analytics: AnalyticsBundle,
    pub options: AvailableOptions,
}

/// Parse a survey date from an ISO date or the date prefix of an ISO
/// datetime ("2026-04-03T11:20:00Z", "2026-04-03 11:20:00"). Unparsable
/// input yields `None`, which the date filters treat as "cannot satisfy".
pub fn parse_survey_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn int_field(record: &Value, key: &str) -> Option<i64> {
    match record.get(key)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn int32_field(record: &Value, key: &str) -> Option<i32> {
    int_field(record, key).and_then(|value| i32::try_from(value).ok())
}

fn text_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

fn date_field(record: &Value, key: &str) -> Option<NaiveDate> {
    match record.get(key)? {
        Value::String(text) => parse_survey_date(text),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn sample_response(survey_type: SurveyType) -> SurveyResponse {
    SurveyResponse {
        response_id: String::new(),
        survey_type,
        project_title: None,
        mentor_choice: None,
        mentor_name: None,
        topics_working_on: None,
        topics_worked_on: None,
        end_date: None,
        rating_onboarding: None,
        rating_initiation: None,
        rating_mentorship: None,
        rating_team: None,
        rating_communications: None,
        rating_expectations: None,
        rating_sponsor: None,
        rating_workload: None,
        recommend_asc: None,
        confidence_job_placement: None,
        hard_skills_improved: None,
        soft_skills_improved: None,
    }
}
