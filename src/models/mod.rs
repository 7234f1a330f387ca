// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod category; // Catégories et table de couleurs (category.rs)
pub mod entry;    // Dépense et liste de dépenses (entry.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazyexpense::models::entry::Entry;
// On peut faire : use lazyexpense::models::Entry;
pub use category::{category_color, Category, Rgb, DEFAULT_SLICE_COLOR, EMPTY_CHART_COLOR};
pub use entry::{Entry, EntryList};
