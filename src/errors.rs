// ============================================================================
// Erreurs de saisie du formulaire
// ============================================================================
// Les erreurs d'I/O (import / export) restent des anyhow::Error ;
// seules les erreurs que l'utilisateur peut corriger dans le formulaire
// sont typées ici :
// - InvalidAmount : montant mal formé ou hors bornes
// - InvalidDate : date qui ne respecte pas MM/DD/YYYY
// - MissingFields : montant, date ou catégorie manquant
// ============================================================================

use thiserror::Error;

/// Erreurs de validation d'une dépense saisie.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    #[error("Invalid amount. Please enter a valid amount.")]
    InvalidAmount,
    #[error("Invalid date format. Please enter a date in MM/DD/YYYY format.")]
    InvalidDate,
    #[error("Please fill in all fields.")]
    MissingFields,
}
