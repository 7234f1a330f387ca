// ============================================================================
// Structures : Entry et EntryList
// ============================================================================
// Une dépense saisie (montant, date, catégorie) et la liste ordonnée
// des dépenses de la session
//
// CONCEPTS RUST :
// 1. Decimal : montant exact (12.50 reste 12.50, pas 12.499999...)
// 2. Encapsulation : EntryList n'expose que push et pop_last
// 3. Deref vers slice : lecture seule de la liste sans copie
// ============================================================================

use std::fmt;

use rust_decimal::Decimal;

/// Une dépense enregistrée
///
/// Immuable une fois créée. La catégorie reste un libellé brut : un import
/// CSV peut contenir des catégories hors de la table fixe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Montant de la dépense
    pub amount: Decimal,

    /// Date au format MM/DD/YYYY (non vérifiée pour les imports)
    pub date: String,

    /// Libellé de la catégorie
    pub category: String,
}

impl Entry {
    /// Crée une nouvelle dépense
    pub fn new(amount: Decimal, date: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            amount,
            date: date.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Amount: ${}, Date: {}, Category: {}",
            self.amount, self.date, self.category
        )
    }
}

/// Liste ordonnée des dépenses de la session
///
/// CONCEPT : Pile append/pop
/// - On ajoute en fin (formulaire ou import CSV)
/// - On retire uniquement le dernier élément (Delete Last / Undo)
/// - Pas de suppression arbitraire ni de modification en place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    /// Crée une liste vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une dépense en fin de liste
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Ajoute plusieurs dépenses en conservant leur ordre
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    /// Retire la dernière dépense (None si la liste est vide)
    pub fn pop_last(&mut self) -> Option<Entry> {
        self.entries.pop()
    }

    /// Vue en lecture seule
    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    /// Copie de la liste (pour l'export en arrière-plan)
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Somme de tous les montants
    ///
    /// None si la somme dépasse la capacité de Decimal (montants importés).
    pub fn total(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |sum, entry| sum.checked_add(entry.amount))
    }
}

impl std::ops::Deref for EntryList {
    type Target = [Entry];

    fn deref(&self) -> &[Entry] {
        &self.entries
    }
}

impl From<Vec<Entry>> for EntryList {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: i64, category: &str) -> Entry {
        Entry::new(Decimal::new(amount, 2), "04/21/2024", category)
    }

    #[test]
    fn test_display_line() {
        let e = Entry::new(Decimal::new(1250, 2), "04/21/2024", "Food");
        assert_eq!(e.to_string(), "Amount: $12.50, Date: 04/21/2024, Category: Food");
    }

    #[test]
    fn test_pop_is_inverse_of_push() {
        let mut list = EntryList::from(vec![entry(1000, "Food"), entry(250, "Fun")]);
        let before = list.clone();

        list.push(entry(9999, "Housing"));
        assert_eq!(list.len(), 3);

        let popped = list.pop_last();
        assert_eq!(popped, Some(entry(9999, "Housing")));
        assert_eq!(list, before);
    }

    #[test]
    fn test_pop_on_empty_list() {
        let mut list = EntryList::new();
        assert_eq!(list.pop_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_total() {
        let list = EntryList::from(vec![entry(1000, "Food"), entry(250, "Fun")]);
        assert_eq!(list.total(), Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn test_total_overflow_is_none() {
        let huge = Entry::new(Decimal::MAX, "01/01/2024", "Food");
        let list = EntryList::from(vec![huge.clone(), huge]);
        assert_eq!(list.total(), None);
    }
}
