// ============================================================================
// Breakdown - Répartition des dépenses par catégorie
// ============================================================================
// Calcule les totaux par catégorie, les proportions et les angles des
// parts du camembert, ainsi que la légende
//
// Aucune dépendance au rendu : le module ui peint ce que ce module calcule.
//
// CONCEPTS RUST :
// 1. Enum avec données : deux chemins de dessin (Full / Slices)
// 2. Vec de paires : map qui conserve l'ordre d'insertion
// 3. ToPrimitive : conversion Decimal -> f64 pour la géométrie
// 4. checked_add / checked_div : un import CSV peut contenir des montants
//    extrêmes, un dépassement donne None au lieu d'un panic
// ============================================================================

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{category_color, Category, Entry, Rgb, EMPTY_CHART_COLOR};

/// Libellé du bucket synthétique, toujours présent dans les totaux
pub const OTHERS_LABEL: &str = "Others";

// ============================================================================
// Totaux par catégorie
// ============================================================================

/// Montant cumulé par libellé de catégorie
///
/// L'ordre d'itération est l'ordre de première apparition dans la liste,
/// avec "Others" ajouté en dernier s'il n'est pas déjà présent.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: Vec<(String, Decimal)>,
}

impl CategoryTotals {
    /// Agrège les montants d'une liste de dépenses
    ///
    /// None si la somme d'une catégorie dépasse la capacité de Decimal.
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        let mut totals: Vec<(String, Decimal)> = Vec::new();

        for entry in entries {
            match totals.iter_mut().find(|(label, _)| *label == entry.category) {
                Some((_, amount)) => *amount = amount.checked_add(entry.amount)?,
                None => totals.push((entry.category.clone(), entry.amount)),
            }
        }

        if !totals.iter().any(|(label, _)| label == OTHERS_LABEL) {
            totals.push((OTHERS_LABEL.to_string(), Decimal::ZERO));
        }

        Some(Self { totals })
    }

    /// Montant d'une catégorie (None si absente)
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.totals
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, amount)| *amount)
    }

    /// Somme de tous les montants (None en cas de dépassement)
    pub fn total(&self) -> Option<Decimal> {
        self.totals
            .iter()
            .try_fold(Decimal::ZERO, |sum, (_, amount)| sum.checked_add(*amount))
    }

    /// Itère sur (libellé, montant) dans l'ordre d'insertion
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(label, amount)| (label.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

// ============================================================================
// Camembert
// ============================================================================

/// Une part du camembert
///
/// Les angles sont en degrés, sens anti-horaire à partir de 3 heures.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub amount: Decimal,
    /// Part du total, entre 0 et 1 pour des montants positifs
    pub proportion: f64,
    pub start_degrees: f64,
    pub extent_degrees: f64,
    pub color: Rgb,
}

impl PieSlice {
    /// Angle de fin (start + extent)
    pub fn end_degrees(&self) -> f64 {
        self.start_degrees + self.extent_degrees
    }
}

/// Instructions de dessin du camembert
///
/// CONCEPT : State machine à deux états
/// - Full : aucune donnée exploitable, un seul disque plein
/// - Slices : une part par catégorie, dans l'ordre des totaux
#[derive(Debug, Clone, PartialEq)]
pub enum PieChart {
    /// Disque plein d'une seule couleur
    Full { color: Rgb },

    /// Parts consécutives à partir de 0°
    Slices(Vec<PieSlice>),
}

impl PieChart {
    /// Calcule le camembert pour une liste de dépenses
    ///
    /// Liste vide ou total nul : disque plein, aucune division n'est faite.
    /// Montants importés trop grands (somme ou proportion hors capacité de
    /// Decimal) : disque plein également.
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self::compute_slices(entries)
            .map(PieChart::Slices)
            .unwrap_or(PieChart::Full { color: EMPTY_CHART_COLOR })
    }

    /// Parts du camembert, None quand il faut dessiner le disque plein
    fn compute_slices(entries: &[Entry]) -> Option<Vec<PieSlice>> {
        if entries.is_empty() {
            return None;
        }

        let totals = CategoryTotals::from_entries(entries)?;
        let total = totals.total()?;
        if total.is_zero() {
            return None;
        }

        let mut start_degrees = 0.0;
        totals
            .iter()
            .map(|(label, amount)| {
                let proportion = amount.checked_div(total)?.to_f64().unwrap_or(0.0);
                let extent_degrees = proportion * 360.0;
                let slice = PieSlice {
                    label: label.to_string(),
                    amount,
                    proportion,
                    start_degrees,
                    extent_degrees,
                    color: category_color(label),
                };
                start_degrees += extent_degrees;
                Some(slice)
            })
            .collect()
    }

    /// Nombre de parts dessinées (1 pour le disque plein)
    pub fn slice_count(&self) -> usize {
        match self {
            PieChart::Full { .. } => 1,
            PieChart::Slices(slices) => slices.len(),
        }
    }

    /// Retrouve la part qui couvre un angle donné
    ///
    /// L'angle est ramené dans [0, 360). Les parts d'étendue nulle ne
    /// couvrent rien ; les erreurs d'arrondi en fin de tour retombent sur
    /// la dernière part non vide.
    pub fn slice_at(&self, angle_degrees: f64) -> Option<&PieSlice> {
        let PieChart::Slices(slices) = self else {
            return None;
        };

        let angle = angle_degrees.rem_euclid(360.0);
        slices
            .iter()
            .filter(|slice| slice.extent_degrees > 0.0)
            .find(|slice| angle >= slice.start_degrees && angle < slice.end_degrees())
            .or_else(|| slices.iter().rev().find(|slice| slice.extent_degrees > 0.0))
    }

    /// Couleur à peindre pour un angle donné
    pub fn color_at(&self, angle_degrees: f64) -> Option<Rgb> {
        match self {
            PieChart::Full { color } => Some(*color),
            PieChart::Slices(_) => self.slice_at(angle_degrees).map(|slice| slice.color),
        }
    }
}

// ============================================================================
// Légende
// ============================================================================

/// Une ligne de la légende
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendRow {
    pub label: &'static str,
    pub color: Rgb,
}

/// Légende complète, indépendante des données
///
/// Une ligne par catégorie de la table de couleurs, dans l'ordre de la table.
pub fn legend() -> Vec<LegendRow> {
    Category::SELECTABLE
        .iter()
        .filter_map(|category| {
            category.color().map(|color| LegendRow {
                label: category.label(),
                color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_SLICE_COLOR;

    fn entry(amount: i64, category: &str) -> Entry {
        Entry::new(Decimal::from(amount), "01/01/2024", category)
    }

    #[test]
    fn test_even_split_with_empty_others() {
        let entries = vec![entry(100, "Food"), entry(100, "Fun")];
        let chart = PieChart::from_entries(&entries);

        let PieChart::Slices(slices) = &chart else {
            panic!("expected slices, got {chart:?}");
        };

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "Food");
        assert_eq!(slices[0].start_degrees, 0.0);
        assert_eq!(slices[0].extent_degrees, 180.0);
        assert_eq!(slices[1].label, "Fun");
        assert_eq!(slices[1].start_degrees, 180.0);
        assert_eq!(slices[1].extent_degrees, 180.0);
        assert_eq!(slices[2].label, OTHERS_LABEL);
        assert_eq!(slices[2].extent_degrees, 0.0);
        assert_eq!(slices[2].color, DEFAULT_SLICE_COLOR);
    }

    #[test]
    fn test_empty_list_is_one_full_circle() {
        let chart = PieChart::from_entries(&[]);
        assert_eq!(chart, PieChart::Full { color: EMPTY_CHART_COLOR });
        assert_eq!(chart.slice_count(), 1);
        assert_eq!(chart.color_at(123.0), Some(EMPTY_CHART_COLOR));
    }

    #[test]
    fn test_zero_total_is_one_full_circle() {
        let chart = PieChart::from_entries(&[entry(0, "Food")]);
        assert_eq!(chart, PieChart::Full { color: EMPTY_CHART_COLOR });
    }

    #[test]
    fn test_totals_keep_first_appearance_order() {
        let entries = vec![entry(5, "Fun"), entry(10, "Food"), entry(20, "Fun")];
        let totals = CategoryTotals::from_entries(&entries).unwrap();

        let labels: Vec<&str> = totals.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Fun", "Food", "Others"]);
        assert_eq!(totals.get("Fun"), Some(Decimal::from(25)));
        assert_eq!(totals.total(), Some(Decimal::from(35)));
    }

    #[test]
    fn test_others_is_not_duplicated() {
        let totals = CategoryTotals::from_entries(&[entry(40, "Others"), entry(60, "Food")]).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Others"), Some(Decimal::from(40)));
    }

    #[test]
    fn test_slices_are_consecutive_and_close_the_circle() {
        let entries = vec![entry(1, "Housing"), entry(2, "Food"), entry(3, "Groceries")];
        let PieChart::Slices(slices) = PieChart::from_entries(&entries) else {
            panic!("expected slices");
        };

        for pair in slices.windows(2) {
            assert!((pair[0].end_degrees() - pair[1].start_degrees).abs() < 1e-9);
        }
        let last = slices.last().map(|s| s.end_degrees()).unwrap_or_default();
        assert!((last - 360.0).abs() < 1e-9);

        // Catégorie inconnue (import CSV) : couleur de repli
        assert_eq!(slices[2].color, DEFAULT_SLICE_COLOR);
        assert_eq!(slices[0].color, Category::Housing.color().unwrap());
    }

    #[test]
    fn test_slice_at() {
        let chart = PieChart::from_entries(&[entry(100, "Food"), entry(300, "Fun")]);

        assert_eq!(chart.slice_at(0.0).map(|s| s.label.as_str()), Some("Food"));
        assert_eq!(chart.slice_at(89.9).map(|s| s.label.as_str()), Some("Food"));
        assert_eq!(chart.slice_at(90.0).map(|s| s.label.as_str()), Some("Fun"));
        assert_eq!(chart.slice_at(-10.0).map(|s| s.label.as_str()), Some("Fun"));
        assert_eq!(chart.slice_at(360.0).map(|s| s.label.as_str()), Some("Food"));
        // Others (0°) n'est jamais peint
        assert_eq!(chart.slice_at(359.999_999).map(|s| s.label.as_str()), Some("Fun"));
    }

    #[test]
    fn test_legend_is_independent_of_data() {
        let rows = legend();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].label, "Housing");
        assert_eq!(rows[9].label, "Miscellaneous");
        assert!(rows.iter().all(|row| row.label != OTHERS_LABEL));
    }

    // Montant maximal représentable, accepté tel quel par l'import CSV
    fn huge(category: &str) -> Entry {
        Entry::new(Decimal::MAX, "01/01/2024", category)
    }

    #[test]
    fn test_overflowing_category_sum_is_full_circle() {
        let entries = vec![huge("Food"), huge("Food")];
        assert_eq!(CategoryTotals::from_entries(&entries), None);
        assert_eq!(PieChart::from_entries(&entries), PieChart::Full { color: EMPTY_CHART_COLOR });
    }

    #[test]
    fn test_overflowing_grand_total_is_full_circle() {
        let entries = vec![huge("Food"), huge("Fun")];
        let totals = CategoryTotals::from_entries(&entries).unwrap();
        assert_eq!(totals.total(), None);
        assert_eq!(PieChart::from_entries(&entries), PieChart::Full { color: EMPTY_CHART_COLOR });
    }

    #[test]
    fn test_overflowing_proportion_is_full_circle() {
        // Total 0.5 : MAX / 0.5 dépasse la capacité de Decimal
        let entries = vec![
            huge("Food"),
            Entry::new(-Decimal::MAX, "01/01/2024", "Fun"),
            Entry::new(Decimal::new(5, 1), "01/01/2024", "Gifts"),
        ];
        let totals = CategoryTotals::from_entries(&entries).unwrap();
        assert_eq!(totals.total(), Some(Decimal::new(5, 1)));

        let chart = PieChart::from_entries(&entries);
        assert_eq!(chart, PieChart::Full { color: EMPTY_CHART_COLOR });
        assert_eq!(chart.color_at(42.0), Some(EMPTY_CHART_COLOR));
    }
}
