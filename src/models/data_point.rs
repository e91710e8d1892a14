// ============================================================================
// Structures : DataPoint et Batch
// ============================================================================
// Un DataPoint est une ligne du JSON des ventes : {"date": ms, "units": n}.
// Un Batch est la séquence ordonnée renvoyée par la source à chaque fetch.
//
// CONCEPTS RUST :
// 1. #[serde(rename)] : le JSON dit "date", le code dit "timestamp"
// 2. #[serde(from)] : désérialise un Vec puis le convertit en Batch
// 3. const associée : la sentinelle est une valeur connue à la compilation
// ============================================================================

use chrono::DateTime;
use serde::Deserialize;

/// Format des labels sous les barres (ex: "Nov 14")
pub const LABEL_FORMAT: &str = "%b %d";

/// Un point de la série : timestamp en millisecondes + nombre d'unités vendues
///
/// Le timestamp reste un f64 : la source peut envoyer un nombre flottant.
/// Les unités sont un u64, un compte négatif est refusé au décodage.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DataPoint {
    /// Millisecondes depuis l'epoch Unix
    #[serde(rename = "date")]
    pub timestamp: f64,

    /// Nombre d'unités vendues
    pub units: u64,
}

impl DataPoint {
    /// Entrée sentinelle utilisée tant qu'aucune donnée réelle n'est arrivée
    pub const SENTINEL: DataPoint = DataPoint {
        timestamp: 0.0,
        units: 0,
    };

    pub fn new(timestamp: f64, units: u64) -> Self {
        Self { timestamp, units }
    }

    /// true si le point vaut exactement la sentinelle (0, 0)
    pub fn is_sentinel(&self) -> bool {
        self.units == 0 && self.timestamp == 0.0
    }

    /// Formate le timestamp en date courte ("Nov 14"), en UTC
    ///
    /// Retourne "?" si le timestamp sort de la plage représentable.
    pub fn label(&self) -> String {
        match DateTime::from_timestamp_millis(self.timestamp.round() as i64) {
            Some(date) => date.format(LABEL_FORMAT).to_string(),
            None => "?".to_string(),
        }
    }
}

/// Nature d'un batch : placeholder (sentinelles) ou données réelles
///
/// La nature appartient au batch entier : un batch n'est jamais à moitié
/// placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Placeholder,
    Live,
}

/// Séquence ordonnée de points, dans l'ordre de la source (gauche → droite)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<DataPoint>")]
pub struct Batch {
    kind: BatchKind,
    points: Vec<DataPoint>,
}

impl Batch {
    /// Batch de `len` sentinelles
    pub fn placeholder(len: usize) -> Self {
        Self {
            kind: BatchKind::Placeholder,
            points: vec![DataPoint::SENTINEL; len],
        }
    }

    /// Batch de données réelles
    pub fn live(points: Vec<DataPoint>) -> Self {
        Self {
            kind: BatchKind::Live,
            points,
        }
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == BatchKind::Placeholder
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Plus grande valeur `units` du batch
    ///
    /// CONCEPT RUST : Iterator::max
    /// - Parcours linéaire, recalculé à chaque appel (rien n'est mis en cache)
    /// - None si le batch est vide
    pub fn max_units(&self) -> Option<u64> {
        self.points.iter().map(|p| p.units).max()
    }
}

impl From<Vec<DataPoint>> for Batch {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::live(points)
    }
}
