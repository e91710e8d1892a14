// ============================================================================
// Configuration du widget
// ============================================================================
// Regroupe les constantes du widget : source des données, cadence de
// rafraîchissement, taille du placeholder.
//
// La source n'est pas configurable par l'utilisateur (pas de CLI, pas de
// variable d'environnement). Seul RUST_LOG agit sur le programme, et il ne
// concerne que le logging.
// ============================================================================

use chrono::Duration;

/// URL fixe du jeu de données des ventes journalières
pub const SOURCE_URL: &str = "https://canvasjs.com/data/gallery/javascript/daily-sales-data.json";

/// Intervalle entre deux rafraîchissements (en minutes)
pub const REFRESH_MINUTES: i64 = 15;

/// Nombre d'entrées sentinelles affichées avant la première donnée réelle
pub const PLACEHOLDER_LEN: usize = 6;

/// User-Agent envoyé avec la requête
const USER_AGENT: &str = concat!("salesgraph/", env!("CARGO_PKG_VERSION"));

/// Paramètres du widget
///
/// CONCEPT RUST : struct de configuration + Default
/// - Les valeurs par défaut sont les seules utilisées en production
/// - Les tests construisent une variante pointant vers un serveur local
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// URL interrogée à chaque rafraîchissement
    pub source_url: String,

    /// Délai entre un snapshot et le suivant
    pub refresh_every: Duration,

    /// Nombre de sentinelles du placeholder
    pub placeholder_len: usize,

    /// User-Agent HTTP
    pub user_agent: String,
}

impl WidgetConfig {
    /// Même configuration, mais avec une autre source (tests uniquement)
    pub fn with_source_url(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            refresh_every: Duration::minutes(REFRESH_MINUTES),
            placeholder_len: PLACEHOLDER_LEN,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.source_url, SOURCE_URL);
        assert_eq!(config.refresh_every, Duration::minutes(15));
        assert_eq!(config.placeholder_len, 6);
        assert!(config.user_agent.starts_with("salesgraph/"));
    }

    #[test]
    fn test_with_source_url_keeps_other_defaults() {
        let config = WidgetConfig::with_source_url("http://127.0.0.1:9/data.json");
        assert_eq!(config.source_url, "http://127.0.0.1:9/data.json");
        assert_eq!(config.refresh_every, Duration::minutes(REFRESH_MINUTES));
        assert_eq!(config.placeholder_len, PLACEHOLDER_LEN);
    }
}
