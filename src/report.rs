use std::fmt::Write;

use crate::models::{DerivedView, FilterCriteria};
use crate::resolve::TOPIC_NAMES;
use crate::stats::{self, RATING_FIELDS};

/// Rescale an average onto the -1..1 band the dashboard tiles use, so a
/// mid-scale answer reads as 0 regardless of the field's native range.
fn normalized(value: f64, min: f64, max: f64) -> f64 {
    stats::round2((value - min) / (max - min) * 2.0 - 1.0)
}

fn describe_filters(criteria: &FilterCriteria) -> String {
    if criteria.is_empty() {
        return "all responses".to_string();
    }

    let mut parts = Vec::new();
    if let Some(mentor) = criteria.mentor() {
        parts.push(format!("mentor ~ \"{mentor}\""));
    }
    if let Some(topic) = criteria.topic() {
        parts.push(format!("topic = \"{topic}\""));
    }
    if let Some(project) = criteria.project_name() {
        parts.push(format!("project ~ \"{project}\""));
    }
    match (criteria.start_date, criteria.end_date) {
        (Some(start), Some(end)) => parts.push(format!("ended {start} to {end}")),
        (Some(start), None) => parts.push(format!("ended on or after {start}")),
        (None, Some(end)) => parts.push(format!("ended on or before {end}")),
        (None, None) => {}
    }
    parts.join(", ")
}

/// Count occurrences of each canonical topic in a raw code list.
fn topic_counts(codes: &[i32]) -> Vec<(&'static str, usize)> {
    TOPIC_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let code = index as i32 + 1;
            (*name, codes.iter().filter(|value| **value == code).count())
        })
        .collect()
}

pub fn build_report(criteria: &FilterCriteria, snapshot_size: usize, view: &DerivedView) -> String {
    let stats = &view.stats;
    let analytics = &view.analytics;
    let mut output = String::new();

    let _ = writeln!(output, "# ASC Survey Dashboard Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} of {} responses)",
        describe_filters(criteria),
        stats.total_responses,
        snapshot_size
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Response Counts");
    let _ = writeln!(output, "- Total responses: {}", stats.total_responses);
    let _ = writeln!(output, "- Starting projects: {}", stats.starting_responses);
    let _ = writeln!(output, "- Ending projects: {}", stats.ending_responses);
    let _ = writeln!(output, "- Completion rate: {:.2}%", stats.completion_rate);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Experience Ratings");

    if stats.average_ratings.is_empty() {
        let _ = writeln!(output, "No ratings reported for this selection.");
    } else {
        for field in &RATING_FIELDS {
            match stats.average_ratings.get(field.key) {
                Some(average) => {
                    let _ = writeln!(
                        output,
                        "- {}: {:.2} (normalized {:+.2})",
                        field.label,
                        average,
                        normalized(*average, 1.0, 3.0)
                    );
                }
                None => {
                    let _ = writeln!(output, "- {}: n/a", field.label);
                }
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Skills and Confidence");

    let scaled = [
        ("Hard skills improved", &analytics.hard_skills_improvement),
        ("Soft skills improved", &analytics.soft_skills_improvement),
        ("Confidence in job placement", &analytics.confidence_levels),
    ];
    for (label, values) in scaled {
        match stats::mean(values) {
            Some(average) => {
                let _ = writeln!(
                    output,
                    "- {}: {:.2} across {} responses (normalized {:+.2})",
                    label,
                    average,
                    values.len(),
                    normalized(average, 1.0, 5.0)
                );
            }
            None => {
                let _ = writeln!(output, "- {label}: n/a");
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendation");
    match stats.average_recommendation {
        Some(average) => {
            let _ = writeln!(output, "Average likelihood to recommend: {average:.2}");
        }
        None => {
            let _ = writeln!(output, "No recommendation scores reported.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Topic Mix");

    if analytics.topics_starting.is_empty() && analytics.topics_ending.is_empty() {
        let _ = writeln!(output, "No topics reported for this selection.");
    } else {
        let starting = topic_counts(&analytics.topics_starting);
        let ending = topic_counts(&analytics.topics_ending);
        for ((name, start_count), (_, end_count)) in starting.into_iter().zip(ending) {
            if start_count == 0 && end_count == 0 {
                continue;
            }
            let _ = writeln!(
                output,
                "- {name}: {start_count} starting / {end_count} ending"
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard;
    use crate::models::{sample_response, SurveyType};

    #[test]
    fn report_covers_counts_ratings_and_topics() {
        let mut starting = sample_response(SurveyType::Starting);
        starting.topics_working_on = Some(3);

        let mut ending = sample_response(SurveyType::Ending);
        ending.topics_worked_on = Some(3);
        ending.rating_team = Some(3);
        ending.hard_skills_improved = Some(5);

        let responses = vec![starting, ending];
        let criteria = FilterCriteria::default();
        let view = dashboard::recompute(&responses, &criteria);
        let report = build_report(&criteria, responses.len(), &view);

        assert!(report.contains("Generated for all responses (2 of 2 responses)"));
        assert!(report.contains("- Total responses: 2"));
        assert!(report.contains("- Completion rate: 100.00%"));
        assert!(report.contains("- Project Team: 3.00 (normalized +1.00)"));
        assert!(report.contains("- Project Sponsor: n/a"));
        assert!(report.contains("- Hard skills improved: 5.00 across 1 responses (normalized +1.00)"));
        assert!(report.contains("- Machine Learning and AI: 1 starting / 1 ending"));
    }

    #[test]
    fn empty_selection_reports_gracefully() {
        let criteria = FilterCriteria {
            mentor: Some("nobody".to_string()),
            ..FilterCriteria::default()
        };
        let view = dashboard::recompute(&[], &criteria);
        let report = build_report(&criteria, 0, &view);

        assert!(report.contains("Generated for mentor ~ \"nobody\""));
        assert!(report.contains("No ratings reported for this selection."));
        assert!(report.contains("No recommendation scores reported."));
        assert!(report.contains("No topics reported for this selection."));
    }
}
