// ============================================================================
// API Client : données de ventes
// ============================================================================
// Récupère le JSON des ventes journalières depuis l'URL fixe
//
// CONCEPTS RUST :
// 1. async/await : un seul GET non-bloquant par rafraîchissement
// 2. Result<T, FetchError> : l'erreur remonte au provider au lieu d'être avalée
// 3. Trait SalesSource : le provider dépend d'une source, pas de reqwest
// ============================================================================

use std::future::Future;

use tracing::{debug, error, info, instrument};

use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::models::Batch;

// ============================================================================
// Trait SalesSource
// ============================================================================
// CONCEPT RUST : impl Future dans un trait
// - Le provider appelle `source.fetch().await` sans savoir s'il parle à
//   reqwest ou à une source de test
// - `+ Send` : la future peut être exécutée par le runtime du worker
// ============================================================================

/// Source de batches de ventes
pub trait SalesSource {
    /// Récupère un batch complet, ou l'erreur rencontrée
    fn fetch(&self) -> impl Future<Output = Result<Batch, FetchError>> + Send;
}

/// Client HTTP vers la source de ventes
#[derive(Debug, Clone)]
pub struct SalesClient {
    http: reqwest::Client,
    url: String,
}

impl SalesClient {
    /// Crée le client à partir de la configuration
    ///
    /// Pas de timeout explicite : celui par défaut de reqwest s'applique.
    pub fn new(config: &WidgetConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            url: config.source_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Effectue le GET et décode la réponse
    ///
    /// Chaque échec est loggé ici, là où il survient, puis renvoyé tel quel.
    /// Aucun retry : le prochain essai est celui du prochain rafraîchissement.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_batch(&self) -> Result<Batch, FetchError> {
        debug!("Sending HTTP request");
        let response = self.http.get(&self.url).send().await.map_err(|e| {
            error!(error = %e, "Sales request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "Sales source returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            FetchError::from(e)
        })?;

        let batch = decode_batch(&body)?;
        info!(points = batch.len(), "Successfully fetched sales data");
        Ok(batch)
    }
}

impl SalesSource for SalesClient {
    fn fetch(&self) -> impl Future<Output = Result<Batch, FetchError>> + Send {
        self.fetch_batch()
    }
}

/// Décode un corps JSON en Batch
///
/// Attend un tableau d'objets `{"date": <ms>, "units": <entier>}`. L'ordre du
/// tableau est conservé.
pub fn decode_batch(body: &[u8]) -> Result<Batch, FetchError> {
    serde_json::from_slice::<Batch>(body).map_err(|e| {
        error!(error = %e, bytes = body.len(), "Failed to decode sales JSON");
        FetchError::from(e)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorKind;
    use crate::models::DataPoint;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serveur HTTP local qui répond une seule fois avec `status` et `body`
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/daily-sales-data.json", addr)
    }

    fn client_for(url: String) -> SalesClient {
        SalesClient::new(&WidgetConfig::with_source_url(url)).unwrap()
    }

    #[test]
    fn test_decode_batch() {
        let body = br#"[{"date":1700000000000,"units":5},{"date":1700086400000,"units":10}]"#;
        let batch = decode_batch(body).unwrap();
        assert_eq!(
            batch.points(),
            &[
                DataPoint::new(1_700_000_000_000.0, 5),
                DataPoint::new(1_700_086_400_000.0, 10),
            ]
        );
    }

    #[test]
    fn test_decode_batch_malformed() {
        let err = decode_batch(br#"[{"date":1700000000000}]"#).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Decode);

        let err = decode_batch(b"<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"date":1700000000000,"units":5},{"date":1700086400000,"units":10},{"date":1700172800000,"units":3}]"#,
        )
        .await;

        let batch = client_for(url).fetch().await.unwrap();
        assert!(!batch.is_placeholder());
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.points()[2].units, 3);
    }

    #[tokio::test]
    async fn test_fetch_decode_error() {
        let url = serve_once("200 OK", r#"[{"date":"yesterday","units":5}]"#).await;

        let err = client_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let url = serve_once("503 Service Unavailable", "{}").await;

        let err = client_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
        assert_eq!(err.kind(), FetchErrorKind::Network);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Réserve un port puis le libère : plus personne n'écoute dessus
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{}/", addr)).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
