// ============================================================================
// Module : models
// ============================================================================
// Structures de données du widget : points, batches, snapshots, timeline
// ============================================================================

pub mod data_point; // DataPoint, Batch, BatchKind
pub mod snapshot;   // Snapshot, Timeline, RefreshPolicy

// Re-export pour écrire `use salesgraph::models::Batch`
pub use data_point::{Batch, BatchKind, DataPoint};
pub use snapshot::{RefreshPolicy, Snapshot, Timeline};
