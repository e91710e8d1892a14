// ============================================================================
// Erreurs du fetcher
// ============================================================================
// Deux familles d'échec : le transport (connexion, statut HTTP) et le décodage
// du JSON. Les erreurs sont loggées là où elles surviennent puis remontées au
// provider, qui décide quoi afficher.
// ============================================================================

use thiserror::Error;

/// Erreur renvoyée par un fetch de données
#[derive(Debug, Error)]
pub enum FetchError {
    /// Échec de transport (DNS, connexion, lecture du corps)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Le serveur a répondu avec un statut non-2xx
    #[error("HTTP status {0}")]
    Status(u16),

    /// Corps JSON invalide ou qui ne correspond pas au schéma attendu
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Famille d'une FetchError
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Decode,
}

impl FetchError {
    /// Classe l'erreur : un statut HTTP compte comme un échec réseau
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) | FetchError::Status(_) => FetchErrorKind::Network,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_kind() {
        let json_err = serde_json::from_str::<u64>("\"nope\"").unwrap_err();
        let err = FetchError::from(json_err);
        assert_eq!(err.kind(), FetchErrorKind::Decode);
        assert!(err.to_string().starts_with("Decode error"));
    }

    #[test]
    fn test_status_is_network() {
        let err = FetchError::Status(503);
        assert_eq!(err.kind(), FetchErrorKind::Network);
        assert_eq!(err.to_string(), "HTTP status 503");
    }
}
