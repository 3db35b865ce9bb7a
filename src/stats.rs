use std::collections::BTreeMap;

use crate::models::{DerivedStats, SurveyResponse, SurveyType};

/// One of the eight experience ratings collected by the ending survey,
/// with the accessor used to pull it off a response.
pub struct RatingField {
    pub key: &'static str,
    pub label: &'static str,
    pub extract: fn(&SurveyResponse) -> Option<i32>,
}

pub const RATING_FIELDS: [RatingField; 8] = [
    RatingField {
        key: "rating_onboarding",
        label: "ASC Onboarding",
        extract: |r| r.rating_onboarding,
    },
    RatingField {
        key: "rating_initiation",
        label: "Project Initiation",
        extract: |r| r.rating_initiation,
    },
    RatingField {
        key: "rating_mentorship",
        label: "Project Mentorship",
        extract: |r| r.rating_mentorship,
    },
    RatingField {
        key: "rating_team",
        label: "Project Team",
        extract: |r| r.rating_team,
    },
    RatingField {
        key: "rating_communications",
        label: "Project Communications",
        extract: |r| r.rating_communications,
    },
    RatingField {
        key: "rating_expectations",
        label: "Project Expectations",
        extract: |r| r.rating_expectations,
    },
    RatingField {
        key: "rating_sponsor",
        label: "Project Sponsor",
        extract: |r| r.rating_sponsor,
    },
    RatingField {
        key: "rating_workload",
        label: "Project Workload",
        extract: |r| r.rating_workload,
    },
];

/// Summarize a filtered response set. Rating and recommendation averages run
/// over the ending subset and only over reported values; a field nobody
/// reported yields no entry at all rather than an average of zero.
pub fn summarize(responses: &[SurveyResponse]) -> DerivedStats {
    let total_responses = responses.len();
    let starting_responses = responses
        .iter()
        .filter(|r| r.survey_type == SurveyType::Starting)
        .count();
    let ending_responses = total_responses - starting_responses;

    let ending: Vec<&SurveyResponse> = responses
        .iter()
        .filter(|r| r.survey_type == SurveyType::Ending)
        .collect();

    let mut average_ratings = BTreeMap::new();
    for field in &RATING_FIELDS {
        let values: Vec<i32> = ending.iter().filter_map(|r| (field.extract)(r)).collect();
        if let Some(average) = mean(&values) {
            average_ratings.insert(field.key, average);
        }
    }

    let recommend_scores: Vec<i32> = ending.iter().filter_map(|r| r.recommend_asc).collect();
    let average_recommendation = mean(&recommend_scores);

    let completion_rate = if starting_responses == 0 {
        0.0
    } else {
        round2(ending_responses as f64 / starting_responses as f64 * 100.0)
    };

    DerivedStats {
        total_responses,
        starting_responses,
        ending_responses,
        average_ratings,
        average_recommendation,
        completion_rate,
    }
}

/// Rounded mean of the reported values; `None` when nothing was reported.
pub fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    Some(round2(sum as f64 / values.len() as f64))
}

/// Round half away from zero at two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_response;

    #[test]
    fn counts_split_by_survey_type() {
        let responses = vec![
            sample_response(SurveyType::Starting),
            sample_response(SurveyType::Starting),
            sample_response(SurveyType::Ending),
        ];
        let stats = summarize(&responses);
        assert_eq!(stats.total_responses, 3);
        assert_eq!(stats.starting_responses, 2);
        assert_eq!(stats.ending_responses, 1);
    }

    #[test]
    fn rating_average_and_completion_rate_scenario() {
        // 4 starting + 6 ending, three ending responses rate the team 2, 3, 4.
        let mut responses = Vec::new();
        for _ in 0..4 {
            responses.push(sample_response(SurveyType::Starting));
        }
        for value in [Some(2), Some(3), Some(4), None, None, None] {
            let mut response = sample_response(SurveyType::Ending);
            response.rating_team = value;
            responses.push(response);
        }

        let stats = summarize(&responses);
        assert_eq!(stats.average_ratings.get("rating_team"), Some(&3.0));
        assert_eq!(stats.completion_rate, 150.0);
    }

    #[test]
    fn unreported_rating_fields_have_no_entry() {
        let mut response = sample_response(SurveyType::Ending);
        response.rating_team = Some(2);
        let stats = summarize(&[response]);

        assert!(stats.average_ratings.contains_key("rating_team"));
        assert!(!stats.average_ratings.contains_key("rating_sponsor"));
    }

    #[test]
    fn starting_responses_never_feed_rating_averages() {
        let mut starting = sample_response(SurveyType::Starting);
        starting.rating_team = Some(1);
        let stats = summarize(&[starting]);
        assert!(stats.average_ratings.is_empty());
    }

    #[test]
    fn completion_rate_is_zero_without_starting_responses() {
        let responses = vec![
            sample_response(SurveyType::Ending),
            sample_response(SurveyType::Ending),
        ];
        assert_eq!(summarize(&responses).completion_rate, 0.0);
    }

    #[test]
    fn recommendation_average_over_reported_values() {
        let mut rated = sample_response(SurveyType::Ending);
        rated.recommend_asc = Some(4);
        let mut also_rated = sample_response(SurveyType::Ending);
        also_rated.recommend_asc = Some(5);
        let silent = sample_response(SurveyType::Ending);

        let stats = summarize(&[rated, also_rated, silent]);
        assert_eq!(stats.average_recommendation, Some(4.5));

        let stats = summarize(&[sample_response(SurveyType::Ending)]);
        assert_eq!(stats.average_recommendation, None);
    }

    #[test]
    fn averages_round_to_two_decimals() {
        assert_eq!(mean(&[2, 2, 3]), Some(2.33));
        assert_eq!(mean(&[1, 2]), Some(1.5));
        assert_eq!(round2(2.125), 2.13);
    }
}
