use crate::catalog::DrinkSummary;
use std::collections::HashSet;

/// Result of feeding a query into the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryUpdate {
    /// Names to display, in catalog order.
    Display(Vec<String>),
    /// A later query was issued while this one waited on the catalog; its
    /// response was dropped and the displayed list was left alone.
    Discarded,
    /// A search for the same leading character is already in flight. The
    /// call that issued it returns the names for the latest query.
    Pending,
}

/// State of one search screen.
#[derive(Debug, Default)]
pub(crate) struct SearchSession {
    /// Uppercase leading character of the last applied remote search
    pub last_prefix: Option<char>,
    /// Results of the last applied remote search only
    pub remote_results: Vec<DrinkSummary>,
    pub current_query: String,
    pub displayed: Vec<String>,
    /// Prefix and ticket of the outstanding remote search
    pub in_flight: Option<(char, u64)>,
    /// Last ticket handed out; survives resets
    pub issued: u64,
}

impl SearchSession {
    pub(crate) fn reset(&mut self) {
        self.last_prefix = None;
        self.remote_results.clear();
        self.current_query.clear();
        self.displayed.clear();
        self.in_flight = None;
    }

    pub(crate) fn next_ticket(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub(crate) fn apply_remote(&mut self, prefix: char, results: Vec<DrinkSummary>) {
        self.last_prefix = Some(prefix);
        self.remote_results = results;
    }

    /// Filters the remote results by the current query and records them as
    /// displayed.
    pub(crate) fn display(&mut self) -> Vec<String> {
        self.displayed = filter_names(&self.remote_results, &self.current_query);
        self.displayed.clone()
    }

    pub(crate) fn resolve_id(&self, name: &str) -> Option<&str> {
        self.remote_results
            .iter()
            .find(|summary| summary.name == name)
            .map(|summary| summary.id.as_str())
    }
}

/// Case-insensitive substring match, catalog order kept, duplicate names collapsed.
pub(crate) fn filter_names(results: &[DrinkSummary], query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let mut seen = HashSet::new();
    results
        .iter()
        .filter(|summary| summary.name.to_lowercase().contains(&query))
        .filter(|summary| seen.insert(summary.name.as_str()))
        .map(|summary| summary.name.clone())
        .collect()
}
