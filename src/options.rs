use crate::filter;
use crate::models::{AvailableOptions, FilterCriteria, SurveyResponse};
use crate::resolve::{self, MENTOR_ROSTER, TOPIC_NAMES};

/// Recompute the filter choices reachable under the current selection.
///
/// The narrowing pass applies the mentor, topic, and date-range criteria to
/// the full snapshot and deliberately leaves the project-name criterion out:
/// picking a project must never narrow the other dropdowns, and the project
/// list itself only follows mentor/topic/date. Mentor and topic dropdowns
/// always offer their canonical universes so the user can pivot anywhere;
/// only custom "Other" mentor names and project titles are data-derived.
pub fn available_options(
    responses: &[SurveyResponse],
    criteria: &FilterCriteria,
) -> AvailableOptions {
    let narrowing = FilterCriteria {
        mentor: criteria.mentor().map(str::to_string),
        topic: criteria.topic().map(str::to_string),
        project_name: None,
        start_date: criteria.start_date,
        end_date: criteria.end_date,
    };
    let subset = filter::apply_filters(responses, &narrowing);

    let mut mentors: Vec<String> = MENTOR_ROSTER.iter().map(|name| name.to_string()).collect();
    let mut custom: Vec<String> = subset
        .iter()
        .map(resolve::mentor_name)
        .filter(|name| !name.is_empty() && !MENTOR_ROSTER.contains(&name.as_str()))
        .collect();
    custom.sort();
    custom.dedup();
    mentors.extend(custom);

    let topics = TOPIC_NAMES.iter().map(|name| name.to_string()).collect();

    let mut projects: Vec<String> = subset
        .iter()
        .filter_map(|response| response.project_title.clone())
        .collect();
    projects.sort();
    projects.dedup();

    AvailableOptions {
        mentors,
        topics,
        projects,
    }
}
