// ============================================================================
// Bars - Calcul de la disposition du graphique en barres
// ============================================================================
// Transforme un Batch en une liste de colonnes prêtes à dessiner.
// Aucune dépendance au terminal : tout est testable sans backend.
//
// ALGORITHME :
// - max = plus grande valeur `units` du batch (recalculée à chaque appel)
// - fraction = units / max, hauteur = fraction * hauteur disponible
// - sentinelle (date = 0 et units = 0) : bloc neutre, ni barre ni label
// - max == 0 sur un batch réel : toutes les fractions valent 0.0
// ============================================================================

use ratatui::style::Color;

use crate::models::Batch;

/// Palette des barres, parcourue dans l'ordre puis recommencée
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Rgb(148, 87, 235),  // Violet
    Color::Green,
    Color::Blue,
    Color::Rgb(255, 105, 180), // Rose
];

/// Couleur des blocs de chargement
pub const PLACEHOLDER_COLOR: Color = Color::DarkGray;

/// Une barre calculée
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Valeur affichée au-dessus de la barre
    pub units: u64,

    /// Hauteur relative, dans [0, 1]
    pub fraction: f64,

    /// Hauteur en lignes de terminal
    pub height: u16,

    /// Date courte sous la barre ("Nov 14")
    pub label: String,

    pub color: Color,
}

/// Contenu d'une colonne du graphique
#[derive(Debug, Clone, PartialEq)]
pub enum BarSlot {
    /// Bloc gris de chargement
    Placeholder,

    /// Barre de données
    Bar(Bar),
}

/// Fraction de la hauteur occupée par `units` quand le maximum vaut `max`
///
/// Retourne 0.0 quand `max == 0` au lieu de diviser par zéro.
pub fn height_fraction(units: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }

    (units as f64 / max as f64).clamp(0.0, 1.0)
}

/// Couleur de la barre d'index `index`
pub fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Calcule une colonne par point, dans l'ordre du batch
///
/// CONCEPT RUST : Iterator chaining
/// - .iter().enumerate() : index pour la couleur
/// - .map() : point → BarSlot
/// - .collect() : Vec<BarSlot>
///
/// # Arguments
/// * `batch` - Données à afficher
/// * `available_height` - Lignes disponibles pour la plus haute barre
pub fn layout_bars(batch: &Batch, available_height: u16) -> Vec<BarSlot> {
    if batch.is_placeholder() {
        return vec![BarSlot::Placeholder; batch.len()];
    }

    let max = batch.max_units().unwrap_or(0);

    batch
        .iter()
        .enumerate()
        .map(|(index, point)| {
            // Une sentinelle reçue de la source reste un bloc neutre
            if point.is_sentinel() {
                return BarSlot::Placeholder;
            }

            let fraction = height_fraction(point.units, max);
            BarSlot::Bar(Bar {
                units: point.units,
                fraction,
                height: (fraction * available_height as f64).round() as u16,
                label: point.label(),
                color: color_for(index),
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
