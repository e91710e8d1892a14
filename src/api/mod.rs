// ============================================================================
// Module : api
// ============================================================================
// Client HTTP de la source de ventes
// ============================================================================

pub mod sales; // Fetch + décodage du JSON des ventes

pub use sales::{decode_batch, SalesClient, SalesSource};
