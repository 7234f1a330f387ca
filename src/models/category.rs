// ============================================================================
// Enum : Category
// ============================================================================
// Les catégories de dépenses et leur table de couleurs fixe
//
// CONCEPTS RUST :
// 1. Enum sans données : ensemble fermé de valeurs
// 2. const : tables connues à la compilation (pas d'allocation)
// 3. Option : "Others" n'a pas de couleur dans la table
// ============================================================================

use std::fmt;

/// Couleur RGB indépendante du backend de rendu
///
/// Le module ui convertit en `ratatui::style::Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Format hexadécimal (ex: "#ff9999")
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Couleur de repli pour une part dont la catégorie n'est pas dans la table
pub const DEFAULT_SLICE_COLOR: Rgb = Rgb(0x00, 0x00, 0x00);

/// Couleur du disque plein quand il n'y a aucune dépense
pub const EMPTY_CHART_COLOR: Rgb = Rgb(0x00, 0x80, 0x00);

/// Catégorie de dépense
///
/// Dix catégories sélectionnables plus `Others`, réservée : toujours
/// présente dans les totaux du graphique mais jamais proposée dans le formulaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    MedicalHealthcare,
    SavingsInvestment,
    PersonalSpending,
    Fun,
    Miscellaneous,
    /// Catégorie réservée (jamais sélectionnable)
    Others,
}

impl Category {
    /// Catégories proposées dans le sélecteur, dans l'ordre d'affichage
    ///
    /// C'est aussi l'ordre de la légende.
    pub const SELECTABLE: [Category; 10] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Insurance,
        Category::MedicalHealthcare,
        Category::SavingsInvestment,
        Category::PersonalSpending,
        Category::Fun,
        Category::Miscellaneous,
    ];

    /// Libellé exact, tel qu'écrit dans les fichiers CSV
    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::MedicalHealthcare => "Medical & Healthcare",
            Category::SavingsInvestment => r"Savings\Investment",
            Category::PersonalSpending => "Personal Spending",
            Category::Fun => "Fun",
            Category::Miscellaneous => "Miscellaneous",
            Category::Others => "Others",
        }
    }

    /// Couleur de la catégorie dans la table fixe
    ///
    /// `None` pour `Others` : le graphique utilise alors la couleur de repli.
    pub fn color(&self) -> Option<Rgb> {
        match self {
            Category::Housing => Some(Rgb(0xff, 0x99, 0x99)),
            Category::Transportation => Some(Rgb(0x66, 0xb3, 0xff)),
            Category::Food => Some(Rgb(0x99, 0xff, 0x99)),
            Category::Utilities => Some(Rgb(0xff, 0xcc, 0x99)),
            Category::Insurance => Some(Rgb(0xff, 0xff, 0x99)),
            Category::MedicalHealthcare => Some(Rgb(0xcc, 0x99, 0xff)),
            Category::SavingsInvestment => Some(Rgb(0xff, 0x66, 0x66)),
            Category::PersonalSpending => Some(Rgb(0x66, 0xff, 0x66)),
            Category::Fun => Some(Rgb(0x33, 0x99, 0xff)),
            Category::Miscellaneous => Some(Rgb(0x99, 0x99, 0xff)),
            Category::Others => None,
        }
    }

    /// Retrouve une catégorie à partir de son libellé exact
    pub fn from_label(label: &str) -> Option<Category> {
        if label == Category::Others.label() {
            return Some(Category::Others);
        }
        Category::SELECTABLE
            .iter()
            .copied()
            .find(|category| category.label() == label)
    }

    /// Indique si la catégorie peut être choisie dans le formulaire
    pub fn is_selectable(&self) -> bool {
        *self != Category::Others
    }

    /// Catégorie suivante dans le sélecteur
    ///
    /// CONCEPT : Cycle avec placeholder
    /// - None représente "Select Category"
    /// - None → Housing → ... → Miscellaneous → None
    pub fn next(current: Option<Category>) -> Option<Category> {
        match current.and_then(|c| Self::position(c)) {
            None => Some(Self::SELECTABLE[0]),
            Some(i) if i + 1 < Self::SELECTABLE.len() => Some(Self::SELECTABLE[i + 1]),
            Some(_) => None,
        }
    }

    /// Catégorie précédente dans le sélecteur (cycle inverse)
    pub fn previous(current: Option<Category>) -> Option<Category> {
        match current.and_then(|c| Self::position(c)) {
            None => Some(Self::SELECTABLE[Self::SELECTABLE.len() - 1]),
            Some(0) => None,
            Some(i) => Some(Self::SELECTABLE[i - 1]),
        }
    }

    fn position(category: Category) -> Option<usize> {
        Self::SELECTABLE.iter().position(|c| *c == category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Couleur d'un libellé de catégorie quelconque
///
/// Les libellés inconnus (imports CSV) et `Others` retombent sur
/// `DEFAULT_SLICE_COLOR`.
pub fn category_color(label: &str) -> Rgb {
    Category::from_label(label)
        .and_then(|category| category.color())
        .unwrap_or(DEFAULT_SLICE_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for category in Category::SELECTABLE {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("Others"), Some(Category::Others));
        assert_eq!(Category::from_label("food"), None);
    }

    #[test]
    fn test_savings_label_keeps_backslash() {
        assert_eq!(Category::SavingsInvestment.label(), "Savings\\Investment");
    }

    #[test]
    fn test_others_falls_back_to_default_color() {
        assert!(!Category::Others.is_selectable());
        assert_eq!(category_color("Others"), DEFAULT_SLICE_COLOR);
        assert_eq!(category_color("Groceries"), DEFAULT_SLICE_COLOR);
        assert_eq!(category_color("Food").hex(), "#99ff99");
    }

    #[test]
    fn test_selector_cycle() {
        assert_eq!(Category::next(None), Some(Category::Housing));
        assert_eq!(Category::next(Some(Category::Housing)), Some(Category::Transportation));
        assert_eq!(Category::next(Some(Category::Miscellaneous)), None);

        assert_eq!(Category::previous(None), Some(Category::Miscellaneous));
        assert_eq!(Category::previous(Some(Category::Housing)), None);
        assert_eq!(Category::previous(Some(Category::Fun)), Some(Category::PersonalSpending));
    }
}
