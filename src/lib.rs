// ============================================================================
// LazyExpense - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;        // État de l'application
pub mod breakdown;  // Totaux par catégorie et parts du camembert
pub mod config;     // Emplacements par défaut
pub mod errors;     // Erreurs de saisie
pub mod models;     // Structures de données
pub mod storage;    // Import / export CSV et worker thread
pub mod ui;         // Interface utilisateur
pub mod validation; // Règles de saisie (montant, date)
