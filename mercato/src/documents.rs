//! Remote document fetch with the same staleness discipline as quotes.

use tracing::{debug, warn};

use mercato_types::{MercatoError, TransportMode};

use crate::core::Mercato;

impl Mercato {
    /// Fetch a remote document's raw body through the proxy router.
    ///
    /// A fresh cached body is served without a network call. On upstream
    /// failure the last fetched body is served instead, if one exists;
    /// only a failure with no prior success surfaces as an error.
    ///
    /// # Errors
    /// `Http` or `Transport` when every attempt failed and no prior body
    /// is cached.
    pub async fn fetch_document(
        &self,
        url: &str,
        mode: TransportMode,
    ) -> Result<String, MercatoError> {
        if let Some(entry) = self.documents.get(url).await
            && self.documents.is_fresh(&entry)
        {
            debug!(url, "serving fresh cached document");
            return Ok(entry.value);
        }

        match self.router.fetch_document(url, mode).await {
            Ok(body) => {
                self.documents.put(url, body.clone()).await;
                Ok(body)
            }
            Err(e) => {
                if let Some(entry) = self.documents.get(url).await {
                    warn!(url, error = %e, "serving stale document after fetch failure");
                    return Ok(entry.value);
                }
                Err(e)
            }
        }
    }
}
