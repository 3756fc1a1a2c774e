use crate::discover::types::{Opportunity, SearchResult, Source};

/// UI lifecycle status. Exactly one value at any time; no state is
/// terminal, the machine cycles for the life of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppStatus {
    #[default]
    Idle,
    Generating,
    Complete,
    Error,
}

/// State machine over one discovery lifecycle.
///
/// Owns everything the presentation layer displays: the status, the last
/// result's two sequences, and the last error message. Transitions are
/// plain methods on the value, so the machine is unit-testable without a
/// terminal.
///
/// Each request carries a monotonically increasing sequence tag; outcomes
/// whose tag is not the latest are discarded, so a stale response arriving
/// after "Try Again" can never clobber the current view.
#[derive(Debug, Default)]
pub struct Session {
    status: AppStatus,
    opportunities: Vec<Opportunity>,
    sources: Vec<Source>,
    error: Option<String>,
    latest_seq: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn is_generating(&self) -> bool {
        self.status() == AppStatus::Generating
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter Generating for a new request and return its sequence tag.
    ///
    /// Clears previously displayed opportunities, sources, and error so no
    /// stale result survives into the new round trip.
    pub fn begin(&mut self) -> u64 {
        self.latest_seq += 1;
        self.opportunities.clear();
        self.sources.clear();
        self.error = None;
        self.status = AppStatus::Generating;
        self.latest_seq
    }

    /// Enter Complete with the delivered result, unless the tag is stale.
    pub fn complete(&mut self, seq: u64, result: SearchResult) {
        if !self.accepts(seq) {
            tracing::debug!(seq, latest = self.latest_seq, "stale success discarded");
            return;
        }
        self.opportunities = result.opportunities;
        self.sources = result.sources;
        self.status = AppStatus::Complete;
    }

    /// Enter Error with the failure message, unless the tag is stale.
    pub fn fail(&mut self, seq: u64, message: String) {
        if !self.accepts(seq) {
            tracing::debug!(seq, latest = self.latest_seq, "stale failure discarded");
            return;
        }
        self.error = Some(message);
        self.status = AppStatus::Error;
    }

    /// "Try Again": back to Idle, dropping the error message.
    pub fn reset(&mut self) {
        self.error = None;
        self.status = AppStatus::Idle;
    }

    fn accepts(&self, seq: u64) -> bool {
        seq == self.latest_seq && self.is_generating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_outcome_is_discarded() {
        let mut session = Session::new();

        let first = session.begin();
        // User gave up and retried before the first request resolved.
        session.fail(first, "timeout".to_string());
        session.reset();
        let second = session.begin();

        // The first request's response arrives late.
        session.complete(
            first,
            SearchResult {
                opportunities: vec![Opportunity::default()],
                sources: vec![],
            },
        );

        assert_eq!(session.status(), AppStatus::Generating);
        assert!(session.opportunities().is_empty());

        session.complete(second, SearchResult::default());
        assert_eq!(session.status(), AppStatus::Complete);
    }

    #[test]
    fn outcome_after_resolution_is_ignored() {
        let mut session = Session::new();
        let seq = session.begin();
        session.complete(seq, SearchResult::default());

        session.fail(seq, "late network error".to_string());
        assert_eq!(session.status(), AppStatus::Complete);
        assert!(session.error().is_none());
    }
}
