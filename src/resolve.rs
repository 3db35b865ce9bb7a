use crate::models::SurveyResponse;

/// Mentor codes 1-14, in choice order. Code 15 is the free-text "Other"
/// option and resolves through `mentor_name`.
pub const MENTOR_ROSTER: [&str; 14] = [
    "Andy Brim",
    "Tyler Brough",
    "Polly Conrad",
    "Chris Corcoran",
    "Doug Derrick",
    "Morgan Diederich",
    "Marc Dotson",
    "Kelly Fadel",
    "Carly Fox",
    "Chelsea Harding",
    "Pedram Jahangiry",
    "Sharad Jones",
    "Toa Pita",
    "Brinley Zabriskie",
];

pub const OTHER_MENTOR_CHOICE: i32 = 15;

/// Topic codes 1-5, shared by both survey types.
pub const TOPIC_NAMES: [&str; 5] = [
    "Data Engineering and Visualization",
    "Business Intelligence and Analytics",
    "Machine Learning and AI",
    "Predictive and Advanced Analytics",
    "Software Development and Web Design",
];

/// Resolve the display name for a response's mentor. Unknown or absent codes
/// resolve to the empty string rather than an error.
pub fn mentor_name(response: &SurveyResponse) -> String {
    match response.mentor_choice {
        Some(OTHER_MENTOR_CHOICE) => response
            .mentor_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Other")
            .to_string(),
        Some(choice) if (1..=MENTOR_ROSTER.len() as i32).contains(&choice) => {
            MENTOR_ROSTER[(choice - 1) as usize].to_string()
        }
        _ => String::new(),
    }
}

/// Resolve the display name for a response's topic. Starting surveys record
/// the code in `topics_working_on`, ending surveys in `topics_worked_on`.
pub fn topic_name(response: &SurveyResponse) -> String {
    let code = response.topics_working_on.or(response.topics_worked_on);
    match code {
        Some(value) if (1..=TOPIC_NAMES.len() as i32).contains(&value) => {
            TOPIC_NAMES[(value - 1) as usize].to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_response, SurveyType};

    #[test]
    fn maps_roster_codes_to_fixed_names() {
        let mut response = sample_response(SurveyType::Starting);
        response.mentor_choice = Some(1);
        assert_eq!(mentor_name(&response), "Andy Brim");

        response.mentor_choice = Some(14);
        assert_eq!(mentor_name(&response), "Brinley Zabriskie");
    }

    #[test]
    fn roster_codes_ignore_the_free_text_name() {
        let mut response = sample_response(SurveyType::Starting);
        response.mentor_choice = Some(2);
        response.mentor_name = Some("Somebody Else".to_string());
        assert_eq!(mentor_name(&response), "Tyler Brough");
    }

    #[test]
    fn other_choice_uses_free_text_name() {
        let mut response = sample_response(SurveyType::Ending);
        response.mentor_choice = Some(15);
        response.mentor_name = Some("Jane Docent".to_string());
        assert_eq!(mentor_name(&response), "Jane Docent");
    }

    #[test]
    fn other_choice_without_a_name_is_other() {
        let mut response = sample_response(SurveyType::Ending);
        response.mentor_choice = Some(15);
        assert_eq!(mentor_name(&response), "Other");
    }

    #[test]
    fn unknown_mentor_codes_resolve_to_empty() {
        let mut response = sample_response(SurveyType::Starting);
        assert_eq!(mentor_name(&response), "");

        response.mentor_choice = Some(0);
        assert_eq!(mentor_name(&response), "");

        response.mentor_choice = Some(99);
        assert_eq!(mentor_name(&response), "");
    }

    #[test]
    fn topic_prefers_the_starting_field() {
        let mut response = sample_response(SurveyType::Starting);
        response.topics_working_on = Some(3);
        assert_eq!(topic_name(&response), "Machine Learning and AI");

        let mut ending = sample_response(SurveyType::Ending);
        ending.topics_worked_on = Some(5);
        assert_eq!(topic_name(&ending), "Software Development and Web Design");
    }

    #[test]
    fn unknown_topic_codes_resolve_to_empty() {
        let mut response = sample_response(SurveyType::Starting);
        assert_eq!(topic_name(&response), "");

        response.topics_working_on = Some(9);
        assert_eq!(topic_name(&response), "");
    }
}
