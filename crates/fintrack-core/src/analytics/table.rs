//! Dense month × category amount table

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::YearMonth;

/// Amounts keyed by (month, category).
///
/// Every month × category cell exists; combinations absent from the source
/// data hold zero. Months are ascending and categories alphabetical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTable {
    months: Vec<YearMonth>,
    categories: Vec<String>,
    /// `values[month_index][category_index]`
    values: Vec<Vec<f64>>,
}

impl MonthlyTable {
    pub fn empty() -> Self {
        Self {
            months: Vec::new(),
            categories: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a dense table from sparse cells. Missing cells become zero.
    pub fn from_cells(cells: &BTreeMap<YearMonth, BTreeMap<String, f64>>) -> Self {
        let mut categories: Vec<String> = cells
            .values()
            .flat_map(|row| row.keys().cloned())
            .collect();
        categories.sort();
        categories.dedup();

        let months: Vec<YearMonth> = cells.keys().copied().collect();
        let values = cells
            .values()
            .map(|row| {
                categories
                    .iter()
                    .map(|c| row.get(c).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self {
            months,
            categories,
            values,
        }
    }

    /// Build from explicit rows; each row must have one value per category
    pub(crate) fn from_rows(
        months: Vec<YearMonth>,
        categories: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(months.len(), values.len());
        debug_assert!(values.iter().all(|row| row.len() == categories.len()));
        Self {
            months,
            categories,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty() || self.categories.is_empty()
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.months.last().copied()
    }

    pub fn get(&self, month: YearMonth, category: &str) -> Option<f64> {
        let m = self.months.iter().position(|x| *x == month)?;
        let c = self.categories.iter().position(|x| x == category)?;
        Some(self.values[m][c])
    }

    /// All values for one category, oldest month first
    pub fn column(&self, category: &str) -> Option<Vec<f64>> {
        let c = self.categories.iter().position(|x| x == category)?;
        Some(self.values.iter().map(|row| row[c]).collect())
    }

    /// Sum of all categories for one month
    pub fn month_total(&self, month: YearMonth) -> Option<f64> {
        let m = self.months.iter().position(|x| *x == month)?;
        Some(self.values[m].iter().sum())
    }

    /// Nested `month → category → amount` view, for JSON output
    pub fn to_nested(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.months
            .iter()
            .zip(&self.values)
            .map(|(month, row)| {
                let cells = self
                    .categories
                    .iter()
                    .cloned()
                    .zip(row.iter().copied())
                    .collect();
                (month.to_string(), cells)
            })
            .collect()
    }

    /// Render as an aligned text table, one row per month
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let cells: Vec<Vec<String>> = self
            .values
            .iter()
            .map(|row| row.iter().map(|v| format!("{:.2}", v)).collect())
            .collect();

        let month_width = "Month".len().max(7);
        let widths: Vec<usize> = self
            .categories
            .iter()
            .enumerate()
            .map(|(c, name)| {
                cells
                    .iter()
                    .map(|row| row[c].len())
                    .max()
                    .unwrap_or(0)
                    .max(name.chars().count())
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{:<month_width$}", "Month"));
        for (name, width) in self.categories.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", name, width = *width));
        }
        out.push('\n');

        for (month, row) in self.months.iter().zip(&cells) {
            out.push_str(&format!("{:<month_width$}", month.to_string()));
            for (cell, width) in row.iter().zip(&widths) {
                out.push_str(&format!("  {:>width$}", cell, width = *width));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn sample_table() -> MonthlyTable {
        let mut cells: BTreeMap<YearMonth, BTreeMap<String, f64>> = BTreeMap::new();
        cells
            .entry(ym("2025-02"))
            .or_default()
            .insert("Rent".into(), 10000.0);
        cells
            .entry(ym("2025-01"))
            .or_default()
            .insert("Food & Dining".into(), 150.0);
        MonthlyTable::from_cells(&cells)
    }

    #[test]
    fn test_from_cells_fills_zeros() {
        let table = sample_table();
        assert_eq!(table.months(), &[ym("2025-01"), ym("2025-02")]);
        assert_eq!(table.categories(), &["Food & Dining", "Rent"]);
        assert_eq!(table.get(ym("2025-01"), "Rent"), Some(0.0));
        assert_eq!(table.get(ym("2025-02"), "Rent"), Some(10000.0));
        assert_eq!(table.get(ym("2025-03"), "Rent"), None);
    }

    #[test]
    fn test_column_and_totals() {
        let table = sample_table();
        assert_eq!(table.column("Food & Dining"), Some(vec![150.0, 0.0]));
        assert_eq!(table.month_total(ym("2025-02")), Some(10000.0));
        assert_eq!(table.last_month(), Some(ym("2025-02")));
    }

    #[test]
    fn test_to_text_alignment() {
        let text = sample_table().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Month"));
        assert!(lines[0].contains("Food & Dining"));
        assert!(lines[1].starts_with("2025-01"));
        assert!(lines[2].ends_with("10000.00"));
        // Columns line up
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_empty_table() {
        let table = MonthlyTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.to_text(), "");
        assert!(table.to_nested().is_empty());
    }
}
