//! Ordered-fallback resolution of candidate requests
//!
//! The resolver knows nothing about which candidate "should" work. It tries
//! them in the order given, once each, and stops at the first one whose
//! response is both fetched and parsed successfully.

use crate::crawler::candidates::RequestDescriptor;
use crate::crawler::fetcher::{Fetch, FetchedPage};
use crate::HarvestError;
use std::sync::Arc;

/// A parsed response together with the candidate that produced it
#[derive(Debug)]
pub struct Resolved<T> {
    pub value: T,
    pub matched: RequestDescriptor,
}

/// Tries candidate requests in priority order
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn Fetch>,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    /// Returns the first candidate that fetches and parses
    ///
    /// # Arguments
    ///
    /// * `candidates` - Requests in priority order
    /// * `parse` - Decodes a fetched page; an `Err` moves on to the next candidate
    ///
    /// # Returns
    ///
    /// * `Ok(Resolved<T>)` - The parsed value and the matching descriptor
    /// * `Err(HarvestError::AllCandidatesFailed)` - Every candidate failed; the
    ///   last underlying error is carried along
    pub async fn resolve<T, F>(
        &self,
        candidates: &[RequestDescriptor],
        parse: F,
    ) -> Result<Resolved<T>, HarvestError>
    where
        F: Fn(&FetchedPage) -> Result<T, HarvestError>,
    {
        let mut last_error = HarvestError::NoCandidates;

        for candidate in candidates {
            tracing::debug!("Trying {} candidate: {}", candidate.name, candidate.url);

            let outcome = match self.fetcher.fetch(candidate).await {
                Ok(page) => {
                    tracing::trace!(
                        "{} answered {} with {} bytes",
                        candidate.url,
                        page.status_code,
                        page.body.len()
                    );
                    parse(&page)
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok(value) => {
                    tracing::debug!("Resolved via {}: {}", candidate.name, candidate.url);
                    return Ok(Resolved {
                        value,
                        matched: candidate.clone(),
                    });
                }
                Err(e) => {
                    if e.is_transport() {
                        tracing::warn!("Candidate {} unreachable: {}", candidate.url, e);
                    } else {
                        tracing::warn!("Candidate {} failed: {}", candidate.url, e);
                    }
                    last_error = e;
                }
            }
        }

        Err(HarvestError::AllCandidatesFailed {
            attempts: candidates.len(),
            last: Box::new(last_error),
        })
    }
}
