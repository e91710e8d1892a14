// ============================================================================
// Module : ui
// ============================================================================
// Rendu du widget et gestion du clavier
// ============================================================================

pub mod bars;   // Géométrie des barres (hauteurs, couleurs, labels)
pub mod events; // Clavier et ticks
pub mod widget; // Dessin ratatui

pub use events::{Event, EventHandler};
pub use widget::render;
