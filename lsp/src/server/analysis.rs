use robson_core::Analyzer;
use tokio::task;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, warn};

use super::convert::issue_to_diagnostic;
use super::state::RobsonLanguageServer;

impl RobsonLanguageServer {
    /// Analyzes the current text of `uri`, stores the result and publishes its
    /// diagnostics. A run whose document changed in the meantime is dropped.
    pub(crate) async fn validate_document(&self, uri: &Url) {
        let settings = self.document_settings(uri).await;
        let (content, version) = match self.documents.get(uri) {
            Some(doc) => (doc.content.to_string(), doc.version),
            None => return,
        };

        let analyzer = Analyzer::new().with_related_information(self.flags().related_information);
        let analysis = match task::spawn_blocking(move || analyzer.analyze(&content, &settings)).await {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(%uri, "analysis task failed: {err}");
                return;
            }
        };

        let current = self.documents.get(uri).map(|doc| doc.version);
        if current != Some(version) {
            debug!(%uri, version, "dropping stale analysis");
            return;
        }

        let diagnostics: Vec<Diagnostic> = analysis
            .issues
            .iter()
            .map(|issue| issue_to_diagnostic(uri, issue))
            .collect();
        self.analyses.replace(uri.clone(), analysis);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(version))
            .await;
    }

    pub(crate) async fn validate_all(&self) {
        let uris: Vec<Url> = self.documents.iter().map(|entry| entry.key().clone()).collect();
        for uri in uris {
            self.validate_document(&uri).await;
        }
    }
}
