use crate::core::distance::miles_to_meters;
use crate::models::{RawCandidate, SearchCriteria};
use crate::services::{NearbySearchRequest, PlacesApi, PlacesError};
use futures::future::join_all;
use std::time::Duration;

/// Default number of rounds: one first page plus two continuations
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Default wait before a freshly issued page token is accepted by the API
pub const DEFAULT_TOKEN_DELAY: Duration = Duration::from_millis(2000);

/// Place type requested from Nearby Search
pub const DEFAULT_PLACE_TYPE: &str = "restaurant";

/// Progress of one pagination slot
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Active(String),
    Exhausted,
}

impl Slot {
    fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Slot::Active(token),
            _ => Slot::Exhausted,
        }
    }
}

/// Drives Nearby Search across pages
///
/// Each round fans out one request per active continuation token and joins
/// on all of them before deciding whether to wait and run another round.
#[derive(Debug, Clone)]
pub struct PageAggregator {
    max_pages: usize,
    token_delay: Duration,
    place_type: String,
}

impl PageAggregator {
    pub fn new(max_pages: usize, token_delay: Duration, place_type: impl Into<String>) -> Self {
        Self {
            max_pages: max_pages.max(1),
            token_delay,
            place_type: place_type.into(),
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    fn initial_request(&self, criteria: &SearchCriteria) -> NearbySearchRequest {
        NearbySearchRequest::Initial {
            latitude: criteria.latitude(),
            longitude: criteria.longitude(),
            radius_meters: miles_to_meters(criteria.max_distance_miles()),
            place_type: self.place_type.clone(),
            open_now: true,
        }
    }

    /// Fetch every page the API will give for `criteria`, up to `max_pages`
    /// rounds
    ///
    /// A failed first page is returned as an error. A failed continuation
    /// only ends its own slot.
    pub async fn fetch_all_candidates(
        &self,
        api: &dyn PlacesApi,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RawCandidate>, PlacesError> {
        let first = api.nearby_search(&self.initial_request(criteria)).await?;

        tracing::debug!("Round 1 returned {} candidates", first.candidates.len());

        let mut candidates = first.candidates;
        let mut slots = vec![Slot::from_token(first.next_page_token)];
        let mut rounds = 1;

        while rounds < self.max_pages {
            let tokens: Vec<String> = slots
                .iter()
                .filter_map(|slot| match slot {
                    Slot::Active(token) => Some(token.clone()),
                    Slot::Exhausted => None,
                })
                .collect();

            if tokens.is_empty() {
                break;
            }

            tokio::time::sleep(self.token_delay).await;
            rounds += 1;

            let requests: Vec<NearbySearchRequest> = tokens
                .into_iter()
                .map(|page_token| NearbySearchRequest::Continuation { page_token })
                .collect();

            let outcomes = join_all(requests.iter().map(|request| api.nearby_search(request))).await;

            slots = outcomes
                .into_iter()
                .map(|outcome| match outcome {
                    Ok(page) => {
                        tracing::debug!(
                            "Round {} returned {} candidates",
                            rounds,
                            page.candidates.len()
                        );
                        candidates.extend(page.candidates);
                        Slot::from_token(page.next_page_token)
                    }
                    Err(e) => {
                        tracing::warn!("Continuation page failed in round {}, skipping: {}", rounds, e);
                        Slot::Exhausted
                    }
                })
                .collect();
        }

        tracing::debug!("Fetched {} candidates over {} rounds", candidates.len(), rounds);

        Ok(candidates)
    }
}

impl Default for PageAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES, DEFAULT_TOKEN_DELAY, DEFAULT_PLACE_TYPE)
    }
}
