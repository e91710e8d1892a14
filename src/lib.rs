// ============================================================================
// salesgraph - Library
// ============================================================================
// Widget terminal : récupère un JSON de ventes toutes les 15 minutes et
// l'affiche en barres datées.
//
// Flux à sens unique : api (fetch) → provider (timeline) → ui (rendu)
// ============================================================================

pub mod api;      // Client HTTP de la source de ventes
pub mod app;      // État du widget côté hôte
pub mod config;   // Constantes : URL, cadence, placeholder
pub mod error;    // FetchError
pub mod host;     // Channels UI <-> worker, clavier
pub mod models;   // DataPoint, Batch, Snapshot, Timeline
pub mod provider; // placeholder / snapshot / timeline
pub mod ui;       // Rendu et événements
