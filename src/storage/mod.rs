// ============================================================================
// Module : storage
// ============================================================================
// Lecture et écriture des dépenses sur disque (CSV), et le worker thread
// qui exécute ces opérations sans bloquer l'interface
// ============================================================================

pub mod csv_file; // Format CSV amount,date,category
pub mod worker;   // Worker thread pour l'import / export

// Re-export des fonctions principales
pub use csv_file::{export_file, import_file, read_entries, write_entries, ImportReport, RejectedRow};
pub use worker::{spawn_io_worker, FileOperation, IoCommand, IoResult};
