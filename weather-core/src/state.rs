//! Search state machine.
//!
//! Pure bookkeeping for one interactive session: the query text, which of the
//! mutually exclusive presentation phases is active, and the generation
//! counter that decides whether a finished lookup is still authoritative.
//! Nothing here performs I/O; see [`crate::controller`] for the async side.

use crate::model::{LookupFailure, WeatherReport};

/// What the presentation surface should currently show.
///
/// A single variant makes "report and failure both present" unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    /// Nothing searched yet, or the last lookup was cancelled.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    Report(WeatherReport),
    Failed(LookupFailure),
}

/// Borrowed rendering input derived from [`SearchPhase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    Empty,
    Loading,
    Failure(&'a str),
    Report(&'a WeatherReport),
}

/// Handle for one started lookup.
///
/// Carries the generation it was issued under and the trimmed city that was
/// sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    city: String,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    phase: SearchPhase,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw input text, untrimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Generation of the most recently started (or cancelled) lookup.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    pub fn last_report(&self) -> Option<&WeatherReport> {
        match &self.phase {
            SearchPhase::Report(report) => Some(report),
            _ => None,
        }
    }

    pub fn last_failure(&self) -> Option<&LookupFailure> {
        match &self.phase {
            SearchPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Replace the query text verbatim. Allowed at any time, including mid-lookup.
    pub fn edit_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Submit is enabled iff the trimmed query is non-empty and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty() && !self.is_in_flight()
    }

    /// Start a lookup if submit is enabled.
    ///
    /// Clears any previous report or failure, enters `Loading` and issues a
    /// ticket under a fresh generation. Returns `None` (and changes nothing)
    /// when submit is disabled.
    pub fn begin_lookup(&mut self) -> Option<LookupTicket> {
        if !self.can_submit() {
            return None;
        }

        self.generation += 1;
        self.phase = SearchPhase::Loading;

        Some(LookupTicket { generation: self.generation, city: self.query.trim().to_string() })
    }

    /// Apply a lookup outcome.
    ///
    /// Only the ticket of the current generation may settle the state, and only
    /// while it is still loading. Stale outcomes are dropped and `false` is
    /// returned.
    pub fn resolve(
        &mut self,
        ticket: &LookupTicket,
        outcome: Result<WeatherReport, LookupFailure>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_in_flight() {
            return false;
        }

        self.phase = match outcome {
            Ok(report) => SearchPhase::Report(report),
            Err(failure) => SearchPhase::Failed(failure),
        };
        true
    }

    /// Abandon the in-flight lookup, returning to `Idle`.
    ///
    /// The generation moves on so the abandoned lookup resolves as stale.
    pub fn cancel(&mut self) -> bool {
        if !self.is_in_flight() {
            return false;
        }

        self.generation += 1;
        self.phase = SearchPhase::Idle;
        true
    }

    pub fn view(&self) -> SearchView<'_> {
        match &self.phase {
            SearchPhase::Idle => SearchView::Empty,
            SearchPhase::Loading => SearchView::Loading,
            SearchPhase::Report(report) => SearchView::Report(report),
            SearchPhase::Failed(failure) => SearchView::Failure(failure.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FailureCode;

    fn report(city: &str, country: &str) -> WeatherReport {
        WeatherReport {
            temperature: 20.5,
            humidity: 65,
            pressure: 1015,
            description: "clear sky".into(),
            wind_speed: 5.2,
            city: city.into(),
            country: country.into(),
        }
    }

    fn assert_exclusive(state: &SearchState) {
        assert!(
            !(state.last_report().is_some() && state.last_failure().is_some()),
            "report and failure must never coexist"
        );
    }

    #[test]
    fn starts_empty() {
        let state = SearchState::new();

        assert_eq!(state.query(), "");
        assert!(!state.is_in_flight());
        assert!(state.last_report().is_none());
        assert!(state.last_failure().is_none());
        assert_eq!(state.view(), SearchView::Empty);
        assert!(!state.can_submit());
    }

    #[test]
    fn submit_enablement_follows_trimmed_query() {
        let mut state = SearchState::new();

        for blank in ["", " ", "\t", "  \n "] {
            state.edit_query(blank);
            assert!(!state.can_submit(), "{blank:?} must disable submit");
            assert!(state.begin_lookup().is_none());
        }

        for text in ["London", "  Paris ", "a", "São Paulo"] {
            state.edit_query(text);
            assert!(state.can_submit(), "{text:?} must enable submit");
        }
    }

    #[test]
    fn edit_stores_text_verbatim() {
        let mut state = SearchState::new();
        state.edit_query("  New York  ");
        assert_eq!(state.query(), "  New York  ");
    }

    #[test]
    fn begin_lookup_trims_city_and_enters_loading() {
        let mut state = SearchState::new();
        state.edit_query("  London ");

        let ticket = state.begin_lookup().expect("submit enabled");

        assert_eq!(ticket.city(), "London");
        assert_eq!(ticket.generation(), 1);
        assert_eq!(state.query(), "  London ");
        assert!(state.is_in_flight());
        assert_eq!(state.view(), SearchView::Loading);
        assert!(!state.can_submit());
    }

    #[test]
    fn submit_while_in_flight_is_ignored() {
        let mut state = SearchState::new();
        state.edit_query("London");
        let first = state.begin_lookup().unwrap();

        state.edit_query("Paris");
        assert!(state.begin_lookup().is_none());
        assert_eq!(state.generation(), first.generation());
        assert_eq!(state.phase(), &SearchPhase::Loading);
    }

    #[test]
    fn success_then_failure_replaces_wholesale() {
        let mut state = SearchState::new();
        state.edit_query("London");
        let ticket = state.begin_lookup().unwrap();
        assert!(state.resolve(&ticket, Ok(report("London", "GB"))));
        assert_exclusive(&state);
        assert_eq!(state.last_report().unwrap().city, "London");

        state.edit_query("NonExistentCity");
        let ticket = state.begin_lookup().unwrap();
        assert!(state.last_report().is_none(), "submit clears previous report");
        assert_exclusive(&state);

        assert!(state.resolve(&ticket, Err(LookupFailure::city_not_found("NonExistentCity"))));
        assert_exclusive(&state);
        assert!(state.last_report().is_none());
        let failure = state.last_failure().unwrap();
        assert_eq!(failure.code(), Some(FailureCode::CityNotFound));
        assert_eq!(state.view(), SearchView::Failure("City 'NonExistentCity' not found"));
        assert!(state.can_submit(), "failures never lock the state machine");
    }

    #[test]
    fn ticket_resolves_at_most_once() {
        let mut state = SearchState::new();
        state.edit_query("London");
        let ticket = state.begin_lookup().unwrap();

        assert!(state.resolve(&ticket, Ok(report("London", "GB"))));
        assert!(!state.resolve(&ticket, Err(LookupFailure::internal())));
        assert_eq!(state.last_report().unwrap().city, "London");
    }

    #[test]
    fn cancelled_lookup_resolves_as_stale() {
        let mut state = SearchState::new();
        state.edit_query("London");
        let stale = state.begin_lookup().unwrap();

        assert!(state.cancel());
        assert_eq!(state.view(), SearchView::Empty);
        assert!(!state.resolve(&stale, Ok(report("London", "GB"))));
        assert_eq!(state.view(), SearchView::Empty);
        assert!(!state.cancel(), "nothing left to cancel");
    }

    #[test]
    fn older_lookup_never_overwrites_newer_one() {
        let mut state = SearchState::new();
        state.edit_query("London");
        let a = state.begin_lookup().unwrap();
        state.cancel();
        state.edit_query("Paris");
        let b = state.begin_lookup().unwrap();

        // A arrives while B is still loading.
        assert!(!state.resolve(&a, Ok(report("London", "GB"))));
        assert!(state.is_in_flight());

        assert!(state.resolve(&b, Ok(report("Paris", "FR"))));

        // A arrives after B settled.
        assert!(!state.resolve(&a, Err(LookupFailure::internal())));
        assert_eq!(state.last_report().unwrap().city, "Paris");
        assert_exclusive(&state);
    }
}
