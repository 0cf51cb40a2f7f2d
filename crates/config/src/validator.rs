//! Endpoint validator (§5): fans a query out to every configured RPC
//! endpoint for a chain, scores each by agreement with the majority
//! response, and excludes endpoints that fall below a trust threshold.

use std::collections::HashMap;

/// Score after one round, given whether this response agreed with the
/// majority. Exposed standalone so the penalty arithmetic is testable
/// without any networking.
pub fn score_endpoint(current_score: u32, agrees_with_majority: bool, penalty: u32) -> u32 {
    if agrees_with_majority {
        current_score
    } else {
        current_score.saturating_sub(penalty)
    }
}

/// Picks the most common response value, or `None` if there were no
/// responses. Ties resolve to whichever value is encountered first by
/// iteration order.
fn majority_value(responses: &HashMap<String, String>) -> Option<&String> {
    let mut counts: HashMap<&String, u32> = HashMap::new();
    for value in responses.values() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value)
}

/// Tracks per-endpoint trust scores across rounds of fan-out queries.
#[derive(Debug, Default)]
pub struct EndpointValidator {
    threshold: u32,
    penalty: u32,
    scores: HashMap<String, u32>,
}

impl EndpointValidator {
    pub fn new(threshold: u32, penalty: u32) -> Self {
        Self {
            threshold,
            penalty,
            scores: HashMap::new(),
        }
    }

    /// Records one round's `endpoint -> response` map, scoring every
    /// endpoint against the round's majority value.
    pub fn record_round(&mut self, responses: &HashMap<String, String>) {
        let majority = majority_value(responses);
        for (endpoint, value) in responses {
            let current = *self.scores.get(endpoint).unwrap_or(&100);
            let agrees = majority == Some(value);
            self.scores
                .insert(endpoint.clone(), score_endpoint(current, agrees, self.penalty));
        }
    }

    pub fn score(&self, endpoint: &str) -> u32 {
        *self.scores.get(endpoint).unwrap_or(&100)
    }

    pub fn is_trusted(&self, endpoint: &str) -> bool {
        self.score(endpoint) >= self.threshold
    }

    /// Endpoints with a score at or above the threshold, for use as the
    /// next round's fan-out set.
    pub fn trusted_endpoints<'a>(&self, candidates: &'a [String]) -> Vec<&'a String> {
        candidates
            .iter()
            .filter(|e| self.is_trusted(e))
            .collect()
    }
}
