use crate::analytics;
use crate::filter;
use crate::models::{DerivedView, FilterCriteria, SurveyResponse};
use crate::options;
use crate::stats;

/// Session lifecycle. The snapshot is written once per successful fetch and
/// read-only afterwards; a retry replaces it atomically via a fresh
/// `FetchStarted`/`FetchSucceeded` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Uninitialized,
    Loading,
    Ready(ReadyState),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyState {
    pub responses: Vec<SurveyResponse>,
    pub filters: FilterCriteria,
    pub view: DerivedView,
}

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    FetchStarted,
    FetchSucceeded(Vec<SurveyResponse>),
    FetchFailed(String),
    FiltersChanged(FilterCriteria),
}

/// Pure state transition. Every snapshot or criteria change rebuilds the
/// whole derived view through `recompute`; nothing is patched incrementally.
pub fn reduce(state: DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::FetchStarted => DashboardState::Loading,
        DashboardEvent::FetchSucceeded(responses) => {
            let filters = match state {
                DashboardState::Ready(ready) => ready.filters,
                _ => FilterCriteria::default(),
            };
            let view = recompute(&responses, &filters);
            DashboardState::Ready(ReadyState {
                responses,
                filters,
                view,
            })
        }
        DashboardEvent::FetchFailed(message) => DashboardState::Error { message },
        DashboardEvent::FiltersChanged(filters) => match state {
            DashboardState::Ready(ready) => {
                let view = recompute(&ready.responses, &filters);
                DashboardState::Ready(ReadyState {
                    responses: ready.responses,
                    filters,
                    view,
                })
            }
            // Filter edits before data arrives have nothing to recompute.
            other => other,
        },
    }
}

/// Derive stats, analytics, and reachable options from one (snapshot,
/// criteria) pair. Pure and idempotent; the options pass runs over the full
/// snapshot because its narrowing rules differ from the summary filter.
pub fn recompute(responses: &[SurveyResponse], filters: &FilterCriteria) -> DerivedView {
    let filtered = filter::apply_filters(responses, filters);
    DerivedView {
        stats: stats::summarize(&filtered),
        analytics: analytics::collect(&filtered),
        options: options::available_options(responses, filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_response, SurveyType};

    fn snapshot() -> Vec<SurveyResponse> {
        let mut starting = sample_response(SurveyType::Starting);
        starting.mentor_choice = Some(1);
        starting.project_title = Some("Project Alpha".to_string());

        let mut ending = sample_response(SurveyType::Ending);
        ending.mentor_choice = Some(2);
        ending.rating_team = Some(3);

        vec![starting, ending]
    }

    #[test]
    fn fetch_lifecycle_reaches_ready() {
        let state = reduce(DashboardState::Uninitialized, DashboardEvent::FetchStarted);
        assert_eq!(state, DashboardState::Loading);

        let state = reduce(state, DashboardEvent::FetchSucceeded(snapshot()));
        match &state {
            DashboardState::Ready(ready) => {
                assert_eq!(ready.view.stats.total_responses, 2);
                assert!(ready.filters.is_empty());
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn fetch_failure_surfaces_one_message_and_allows_retry() {
        let state = reduce(
            DashboardState::Loading,
            DashboardEvent::FetchFailed("backend unreachable".to_string()),
        );
        assert_eq!(
            state,
            DashboardState::Error {
                message: "backend unreachable".to_string()
            }
        );

        // Retry is a plain re-fetch, no partial state to clean up.
        let state = reduce(state, DashboardEvent::FetchStarted);
        assert_eq!(state, DashboardState::Loading);
    }

    #[test]
    fn filter_changes_recompute_the_whole_view() {
        let state = reduce(
            DashboardState::Loading,
            DashboardEvent::FetchSucceeded(snapshot()),
        );
        let criteria = FilterCriteria {
            mentor: Some("brim".to_string()),
            ..FilterCriteria::default()
        };
        let state = reduce(state, DashboardEvent::FiltersChanged(criteria.clone()));

        match state {
            DashboardState::Ready(ready) => {
                assert_eq!(ready.filters, criteria);
                assert_eq!(ready.view.stats.total_responses, 1);
                assert_eq!(ready.view.stats.starting_responses, 1);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn filter_changes_before_ready_are_ignored() {
        let criteria = FilterCriteria {
            topic: Some("Machine Learning and AI".to_string()),
            ..FilterCriteria::default()
        };
        let state = reduce(
            DashboardState::Loading,
            DashboardEvent::FiltersChanged(criteria),
        );
        assert_eq!(state, DashboardState::Loading);
    }

    #[test]
    fn recompute_is_idempotent() {
        let responses = snapshot();
        let criteria = FilterCriteria {
            mentor: Some("brim".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(
            recompute(&responses, &criteria),
            recompute(&responses, &criteria)
        );
    }

    #[test]
    fn empty_criteria_keep_the_full_snapshot() {
        let responses = snapshot();
        let view = recompute(&responses, &FilterCriteria::default());
        assert_eq!(view.stats.total_responses, responses.len());
    }
}
