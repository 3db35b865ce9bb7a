use crate::models::{AnalyticsBundle, SurveyResponse, SurveyType};

/// Extract the raw analytics value lists from a filtered response set.
/// No aggregation happens here; the lists keep filtered order and duplicates
/// so the presentation layer can average or bucket them as it likes.
pub fn collect(responses: &[SurveyResponse]) -> AnalyticsBundle {
    let mut bundle = AnalyticsBundle::default();

    for response in responses {
        match response.survey_type {
            SurveyType::Starting => {
                if let Some(topic) = response.topics_working_on {
                    bundle.topics_starting.push(topic);
                }
            }
            SurveyType::Ending => {
                if let Some(topic) = response.topics_worked_on {
                    bundle.topics_ending.push(topic);
                }
                if let Some(level) = response.confidence_job_placement {
                    bundle.confidence_levels.push(level);
                }
                if let Some(value) = response.hard_skills_improved {
                    bundle.hard_skills_improvement.push(value);
                }
                if let Some(value) = response.soft_skills_improved {
                    bundle.soft_skills_improvement.push(value);
                }
            }
        }
    }

    bundle
}
