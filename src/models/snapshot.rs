// ============================================================================
// Structures : Snapshot et Timeline
// ============================================================================
// Un Snapshot est un batch horodaté prêt à être affiché. Chaque rafraîchissement
// en produit un nouveau qui remplace entièrement le précédent : pas d'historique,
// pas de fusion.
//
// Une Timeline est ce que le provider rend à l'hôte : une seule entrée et
// l'instant à partir duquel redemander.
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::Batch;

/// Batch horodaté
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Instant de production du snapshot
    pub as_of: DateTime<Utc>,

    /// Données à afficher
    pub batch: Batch,

    /// true si le provider réémet un ancien snapshot après un fetch raté
    pub stale: bool,
}

impl Snapshot {
    pub fn new(as_of: DateTime<Utc>, batch: Batch) -> Self {
        Self {
            as_of,
            batch,
            stale: false,
        }
    }

    /// Même contenu, marqué comme périmé
    pub fn into_stale(self) -> Self {
        Self {
            stale: true,
            ..self
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.batch.is_placeholder()
    }
}

/// Politique de rafraîchissement renvoyée à l'hôte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Redemander une timeline à partir de cet instant
    After(DateTime<Utc>),
}

/// Planning d'affichage : une entrée + la politique de rafraîchissement
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub entries: Vec<Snapshot>,
    pub policy: RefreshPolicy,
}

impl Timeline {
    /// Timeline à une seule entrée
    pub fn single(snapshot: Snapshot, next_refresh: DateTime<Utc>) -> Self {
        Self {
            entries: vec![snapshot],
            policy: RefreshPolicy::After(next_refresh),
        }
    }

    /// Instant du prochain rafraîchissement
    pub fn next_refresh(&self) -> DateTime<Utc> {
        match self.policy {
            RefreshPolicy::After(at) => at,
        }
    }

    /// Entrée à afficher maintenant
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.first()
    }

    /// Consomme la timeline et rend son entrée
    pub fn into_current(self) -> Option<Snapshot> {
        self.entries.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataPoint;
    use chrono::Duration;

    #[test]
    fn test_into_stale_keeps_content() {
        let now = Utc::now();
        let snapshot = Snapshot::new(now, Batch::live(vec![DataPoint::new(1.0, 2)]));
        assert!(!snapshot.stale);

        let stale = snapshot.clone().into_stale();
        assert!(stale.stale);
        assert_eq!(stale.as_of, snapshot.as_of);
        assert_eq!(stale.batch, snapshot.batch);
    }

    #[test]
    fn test_single_entry_timeline() {
        let now = Utc::now();
        let next = now + Duration::minutes(15);
        let timeline = Timeline::single(Snapshot::new(now, Batch::placeholder(6)), next);

        assert_eq!(timeline.entries.len(), 1);
        assert_eq!(timeline.next_refresh(), next);
        assert!(timeline.current().map(Snapshot::is_placeholder).unwrap_or(false));
        assert_eq!(timeline.into_current().map(|s| s.as_of), Some(now));
    }
}
