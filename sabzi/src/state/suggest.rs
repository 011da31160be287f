use fresh_api::endpoints::vegetables::Vegetable;
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before the catalog is matched.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Queries shorter than this match nearly the whole catalog, so they
/// produce no suggestions at all.
pub const MIN_QUERY_LEN: usize = 2;

/// Filter the vegetable catalog by a query fragment for autocomplete.
///
/// Matching is a case-insensitive substring test on the entry name.
/// Availability filtering is a caller decision: the item-entry flow only
/// surfaces entries currently in stock, other consumers may want the full
/// catalog.
pub fn match_vegetables<'a>(
    catalog: &'a [Vegetable],
    query: &str,
    only_available: bool,
) -> Vec<&'a Vegetable> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    catalog
        .iter()
        .filter(|v| !only_available || v.is_available)
        .filter(|v| v.name.to_lowercase().contains(&query_lower))
        .collect()
}

/// A latest-wins slot of size one: scheduling replaces whatever was pending,
/// so two overlapping timers can never both fire. Time is passed in by the
/// caller, which keeps the whole thing synchronous and testable.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `query` to fire after the quiet period, superseding any
    /// previously scheduled query.
    pub fn schedule(&mut self, query: String, now: Instant) {
        self.pending = Some((query, now + self.delay));
    }

    /// Take the scheduled query if its deadline has passed. Fires at most
    /// once per schedule.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, deadline)| *deadline <= now);
        if due {
            self.pending.take().map(|(query, _)| query)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

/// Debounced autocomplete state for the vegetable name input on the bill
/// form. The app loop's interval tick drives [`SuggestionState::poll`].
#[derive(Debug, Clone)]
pub struct SuggestionState {
    pub search_query: String,
    pub suggestions: Vec<Vegetable>,
    pub selection_index: usize,
    only_available: bool,
    debounce: Debounce,
}

impl SuggestionState {
    pub fn new(only_available: bool) -> Self {
        Self {
            search_query: String::new(),
            suggestions: Vec::new(),
            selection_index: 0,
            only_available,
            debounce: Debounce::default(),
        }
    }

    /// Record the query and (re)start the quiet period. The match itself
    /// runs later, from `poll`.
    pub fn load_suggestions(&mut self, query: &str, now: Instant) {
        self.search_query = query.to_string();
        self.debounce.schedule(query.to_string(), now);
    }

    /// Run the pending match if its quiet period has elapsed. Returns true
    /// when the suggestion list was recomputed.
    pub fn poll(&mut self, catalog: &[Vegetable], now: Instant) -> bool {
        let Some(query) = self.debounce.poll(now) else {
            return false;
        };

        self.suggestions = match_vegetables(catalog, &query, self.only_available)
            .into_iter()
            .cloned()
            .collect();
        self.selection_index = 0;
        true
    }

    /// Drop the current suggestions and cancel anything pending, so a
    /// superseded query can't surface after the user picked an entry.
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.selection_index = 0;
        self.debounce.cancel();
    }

    pub fn select_prev(&mut self) {
        if !self.suggestions.is_empty() {
            if self.selection_index == 0 {
                self.selection_index = self.suggestions.len() - 1;
            } else {
                self.selection_index -= 1;
            }
        }
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selection_index = (self.selection_index + 1) % self.suggestions.len();
        }
    }

    pub fn selected(&self) -> Option<&Vegetable> {
        self.suggestions.get(self.selection_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn veg(name: &str, is_available: bool) -> Vegetable {
        Vegetable {
            id: name.to_lowercase(),
            name: name.to_string(),
            is_available,
            created_at: Utc::now(),
        }
    }

    fn names(matched: &[&Vegetable]) -> Vec<String> {
        matched.iter().map(|v| v.name.clone()).collect()
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let catalog = vec![veg("Carrot", true), veg("Potato", true)];
        assert_eq!(names(&match_vegetables(&catalog, "CAR", false)), ["Carrot"]);
        assert_eq!(names(&match_vegetables(&catalog, "tat", false)), ["Potato"]);
    }

    #[test]
    fn short_queries_yield_nothing() {
        let catalog = vec![veg("Carrot", true)];
        assert!(match_vegetables(&catalog, "", true).is_empty());
        assert!(match_vegetables(&catalog, "c", true).is_empty());
        assert_eq!(match_vegetables(&catalog, "ca", true).len(), 1);
    }

    #[test]
    fn availability_filter_is_opt_in() {
        let catalog = vec![veg("Carrot", true), veg("Cardamom", false)];

        let available_only = match_vegetables(&catalog, "car", true);
        assert_eq!(names(&available_only), ["Carrot"]);

        let everything = match_vegetables(&catalog, "car", false);
        assert_eq!(names(&everything), ["Carrot", "Cardamom"]);
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        assert!(match_vegetables(&[], "carrot", true).is_empty());
    }

    #[test]
    fn debounce_fires_only_after_the_quiet_period() {
        let start = Instant::now();
        let mut debounce = Debounce::default();
        debounce.schedule("app".to_string(), start);

        assert_eq!(debounce.poll(start), None);
        assert_eq!(debounce.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debounce.poll(start + Duration::from_millis(300)),
            Some("app".to_string())
        );
        // A fired slot is empty
        assert_eq!(debounce.poll(start + Duration::from_millis(400)), None);
    }

    #[test]
    fn rapid_schedules_collapse_to_the_last_query() {
        let start = Instant::now();
        let catalog = vec![veg("Apple Gourd", true), veg("Carrot", true)];
        let mut state = SuggestionState::new(true);

        state.load_suggestions("a", start);
        state.load_suggestions("ap", start + Duration::from_millis(100));
        state.load_suggestions("app", start + Duration::from_millis(200));

        // 350ms in: past the first two would-be deadlines, inside the last
        let mut computations = 0;
        if state.poll(&catalog, start + Duration::from_millis(350)) {
            computations += 1;
        }
        assert_eq!(computations, 0, "superseded queries must never fire");

        assert!(state.poll(&catalog, start + Duration::from_millis(500)));
        assert_eq!(state.search_query, "app");
        assert_eq!(state.suggestions.len(), 1);
        assert_eq!(state.suggestions[0].name, "Apple Gourd");

        // Exactly one computation happened for the whole burst
        assert!(!state.poll(&catalog, start + Duration::from_millis(600)));
    }

    #[test]
    fn min_query_length_applies_after_the_debounce() {
        let start = Instant::now();
        let catalog = vec![veg("Carrot", true)];
        let mut state = SuggestionState::new(true);

        state.load_suggestions("ca", start);
        assert!(state.poll(&catalog, start + DEBOUNCE_DELAY));
        assert_eq!(state.suggestions.len(), 1);

        state.load_suggestions("c", start + Duration::from_millis(400));
        assert!(state.poll(&catalog, start + Duration::from_millis(800)));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn clear_cancels_the_pending_match() {
        let start = Instant::now();
        let catalog = vec![veg("Carrot", true)];
        let mut state = SuggestionState::new(true);

        state.load_suggestions("car", start);
        state.clear_suggestions();

        assert!(!state.poll(&catalog, start + Duration::from_secs(1)));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let start = Instant::now();
        let catalog = vec![veg("Carrot", true), veg("Cardamom", true)];
        let mut state = SuggestionState::new(false);
        state.load_suggestions("car", start);
        state.poll(&catalog, start + DEBOUNCE_DELAY);

        assert_eq!(state.selected().unwrap().name, "Carrot");
        state.select_next();
        assert_eq!(state.selected().unwrap().name, "Cardamom");
        state.select_next();
        assert_eq!(state.selected().unwrap().name, "Carrot");
        state.select_prev();
        assert_eq!(state.selected().unwrap().name, "Cardamom");
    }
}
