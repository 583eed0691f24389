use crate::core::{
    filters::eligible,
    paginator::PageAggregator,
    projector::project,
};
use crate::models::{FilteredResult, RawCandidate, SearchCriteria};
use crate::services::{PlacesApi, PlacesError};

/// Result of one search
#[derive(Debug)]
pub struct FindResult {
    pub results: Vec<FilteredResult>,
    pub total_candidates: usize,
}

/// Search orchestrator - fetch, filter, project
///
/// # Pipeline Stages
/// 1. Paginated fetch from Nearby Search
/// 2. Open / rating / reviews / price filtering
/// 3. Projection with distance from the search origin
/// 4. Optional max-distance enforcement
///
/// Holds no per-search state, so one instance serves every request.
#[derive(Debug, Clone)]
pub struct FoodFinder {
    aggregator: PageAggregator,
    enforce_max_distance: bool,
}

impl FoodFinder {
    pub fn new(aggregator: PageAggregator, enforce_max_distance: bool) -> Self {
        Self {
            aggregator,
            enforce_max_distance,
        }
    }

    /// Run the full pipeline for one search
    ///
    /// Only a failed first page is an error; an empty result list is not.
    pub async fn find_food(
        &self,
        api: &dyn PlacesApi,
        criteria: &SearchCriteria,
    ) -> Result<FindResult, PlacesError> {
        let candidates = self.aggregator.fetch_all_candidates(api, criteria).await?;
        Ok(self.process(&candidates, criteria))
    }

    /// Filter and project already fetched candidates
    pub fn process(&self, candidates: &[RawCandidate], criteria: &SearchCriteria) -> FindResult {
        let results: Vec<FilteredResult> = candidates
            .iter()
            .filter_map(|candidate| eligible(candidate, criteria))
            .map(|checked| project(&checked, criteria))
            .filter(|result| {
                !self.enforce_max_distance || result.distance <= criteria.max_distance_miles()
            })
            .collect();

        FindResult {
            results,
            total_candidates: candidates.len(),
        }
    }
}

impl Default for FoodFinder {
    fn default() -> Self {
        Self::new(PageAggregator::default(), true)
    }
}
