use crate::models::{FilterCriteria, SurveyResponse};
use crate::resolve;

/// Test one response against every active criterion. Absent criteria impose
/// no constraint; active criteria combine with logical AND.
pub fn matches(response: &SurveyResponse, criteria: &FilterCriteria) -> bool {
    if let Some(mentor) = criteria.mentor() {
        let name = resolve::mentor_name(response);
        if !name.to_lowercase().contains(&mentor.to_lowercase()) {
            return false;
        }
    }

    if let Some(project) = criteria.project_name() {
        let matched = response
            .project_title
            .as_deref()
            .map(|title| title.to_lowercase().contains(&project.to_lowercase()))
            .unwrap_or(false);
        if !matched {
            return false;
        }
    }

    if let Some(topic) = criteria.topic() {
        if resolve::topic_name(response) != topic {
            return false;
        }
    }

    if criteria.start_date.is_some() || criteria.end_date.is_some() {
        // A response without a usable end date cannot satisfy a date range.
        let Some(end_date) = response.end_date else {
            return false;
        };
        if let Some(start) = criteria.start_date {
            if end_date < start {
                return false;
            }
        }
        if let Some(end) = criteria.end_date {
            if end_date > end {
                return false;
            }
        }
    }

    true
}

/// Narrow a snapshot to the responses passing every active criterion,
/// preserving snapshot order.
pub fn apply_filters(responses: &[SurveyResponse], criteria: &FilterCriteria) -> Vec<SurveyResponse> {
    responses
        .iter()
        .filter(|response| matches(response, criteria))
        .cloned()
        .collect()
}
