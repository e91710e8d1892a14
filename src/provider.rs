// ============================================================================
// Timeline Provider
// ============================================================================
// Fait le pont entre l'hôte (qui décide quand rafraîchir) et le fetcher.
//
// Trois points d'entrée pour l'hôte :
// - placeholder() : synchrone, sentinelles, aucune I/O
// - snapshot()    : les mêmes sentinelles, rendues de manière asynchrone
// - timeline()    : fetch + une entrée + "redemander dans 15 minutes"
//
// Un fetch raté ne bloque jamais timeline() : le dernier snapshot valide
// (ou le placeholder) est réémis, marqué comme périmé.
//
// CONCEPT RUST : State machine avec enum
// Placeholder → AwaitingFetch → Scheduled { next_refresh }
// ============================================================================

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::api::SalesSource;
use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::models::{Batch, Snapshot, Timeline};

/// État du provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    /// Aucun fetch lancé : seul le placeholder est disponible
    Placeholder,

    /// Un fetch est en cours pour construire la timeline
    AwaitingFetch,

    /// Une timeline a été rendue, prochain rafraîchissement prévu
    Scheduled { next_refresh: DateTime<Utc> },
}

/// Provider générique sur sa source de données
///
/// CONCEPT RUST : Generics + trait bound
/// - `S: SalesSource` : en production un SalesClient, en test une source simulée
pub struct TimelineProvider<S> {
    source: S,
    config: WidgetConfig,
    state: ProviderState,

    /// Dernier snapshot issu d'un fetch réussi
    last_good: Option<Snapshot>,
}

impl<S: SalesSource> TimelineProvider<S> {
    pub fn new(source: S, config: WidgetConfig) -> Self {
        Self {
            source,
            config,
            state: ProviderState::Placeholder,
            last_good: None,
        }
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    /// Dernier snapshot réel connu
    pub fn last_good(&self) -> Option<&Snapshot> {
        self.last_good.as_ref()
    }

    /// Snapshot de chargement : N sentinelles, horodaté maintenant
    pub fn placeholder(&self) -> Snapshot {
        Snapshot::new(Utc::now(), Batch::placeholder(self.config.placeholder_len))
    }

    /// Aperçu rapide pour l'hôte : même contenu que placeholder(), sans I/O
    pub async fn snapshot(&self) -> Snapshot {
        self.placeholder()
    }

    /// Fetch + horodatage, sans toucher à l'état du provider
    pub async fn refresh(&self) -> Result<Snapshot, FetchError> {
        let batch = self.source.fetch().await?;
        Ok(Snapshot::new(Utc::now(), batch))
    }

    /// Instant du prochain rafraîchissement pour un snapshot produit à `as_of`
    pub fn next_refresh_after(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        as_of + self.config.refresh_every
    }

    /// Construit la timeline à une entrée
    ///
    /// Succès : snapshot frais, `next_refresh = as_of + 15 min`.
    /// Échec : l'erreur est loggée, le dernier snapshot valide (ou le
    /// placeholder) est réémis avec `stale = true`, même politique.
    #[instrument(skip(self))]
    pub async fn timeline(&mut self) -> Timeline {
        self.state = ProviderState::AwaitingFetch;

        let (entry, next_refresh) = match self.refresh().await {
            Ok(snapshot) => {
                let next_refresh = self.next_refresh_after(snapshot.as_of);
                info!(
                    points = snapshot.batch.len(),
                    next_refresh = %next_refresh,
                    "Timeline built from fresh data"
                );
                self.last_good = Some(snapshot.clone());
                (snapshot, next_refresh)
            }
            Err(e) => {
                let next_refresh = self.next_refresh_after(Utc::now());
                let fallback = self
                    .last_good
                    .clone()
                    .unwrap_or_else(|| self.placeholder())
                    .into_stale();
                warn!(
                    error = %e,
                    kind = ?e.kind(),
                    placeholder = fallback.is_placeholder(),
                    next_refresh = %next_refresh,
                    "Fetch failed, re-emitting previous snapshot"
                );
                (fallback, next_refresh)
            }
        };

        self.state = ProviderState::Scheduled { next_refresh };
        Timeline::single(entry, next_refresh)
    }
}

// ============================================================================
// Tests
// ============================================================================
