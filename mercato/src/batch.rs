//! Concurrent fan-out over independent logical requests.

use futures::future::join_all;

use mercato_types::{Instrument, Quote};

use crate::core::Mercato;

impl Mercato {
    /// Resolve quotes for a batch of instruments.
    ///
    /// One resolution runs per instrument, concurrently; the returned
    /// vector has the same length and order as the input, one quote per
    /// instrument. A failure in one item never cancels or delays its
    /// siblings; failed items simply carry a `Stale` or `Unknown`
    /// status.
    ///
    /// When a courtesy delay is configured, item launches are staggered
    /// by it so that a batch of many instruments against one
    /// shared-rate-limited provider does not land as a single burst.
    /// Results still settle fully before the call returns.
    pub async fn resolve_batch(&self, instruments: &[Instrument]) -> Vec<Quote> {
        if instruments.is_empty() {
            return vec![];
        }

        match self.cfg.courtesy_delay {
            None => join_all(instruments.iter().map(|inst| self.resolve_quote(inst))).await,
            Some(delay) => {
                let tasks = instruments.iter().enumerate().map(|(i, inst)| async move {
                    if i > 0 {
                        tokio::time::sleep(delay * u32::try_from(i).unwrap_or(u32::MAX)).await;
                    }
                    self.resolve_quote(inst).await
                });
                join_all(tasks).await
            }
        }
    }
}
