//! Per-pass statistics
//!
//! Derived from a [`ClassifiedPass`](super::classifier::ClassifiedPass) and
//! the dictionary after the pass; never persisted.

use super::category::Category;
use super::table::Lexicon;
use std::fmt;

const RULE: &str = "----------------------------------------------------";

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Distinct lexemes in the document
    pub total: usize,
    /// Distinct lexemes that had to be resolved
    pub learned: usize,
    /// Lexeme totals of every category, in registration order
    pub per_category: Vec<(Category, usize)>,
}

impl Statistics {
    pub fn new(total: usize, learned: usize, lexicon: &impl Lexicon) -> Self {
        Statistics {
            total,
            learned,
            per_category: lexicon
                .categories()
                .iter()
                .map(|category| (category.clone(), lexicon.lexeme_count(category)))
                .collect(),
        }
    }

    /// Distinct lexemes the dictionary already knew
    pub fn processed(&self) -> usize {
        self.total.saturating_sub(self.learned)
    }

    pub fn processed_percent(&self) -> f64 {
        percent(self.processed(), self.total)
    }

    pub fn learned_percent(&self) -> f64 {
        percent(self.learned, self.total)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Total lexemes in current text: {}", self.total)?;
        writeln!(
            f,
            "Processed lexemes: {} ({:.2}%)",
            self.processed(),
            self.processed_percent()
        )?;
        writeln!(
            f,
            "Unprocessed lexemes: {} ({:.2}%)",
            self.learned,
            self.learned_percent()
        )?;
        writeln!(f, "{}", RULE)?;
        for (category, count) in &self.per_category {
            writeln!(f, "{}: {} lexemes", category, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::table::MembershipTable;

    #[test]
    fn empty_document_reports_zero_percentages() {
        let stats = Statistics::new(0, 0, &MembershipTable::new());
        assert_eq!(stats.processed_percent(), 0.0);
        assert_eq!(stats.learned_percent(), 0.0);

        let report = stats.to_string();
        assert!(report.contains("Total lexemes in current text: 0"));
        assert!(report.contains("Processed lexemes: 0 (0.00%)"));
        assert!(report.contains("Unprocessed lexemes: 0 (0.00%)"));
    }

    #[test]
    fn reports_shares_and_category_totals() {
        let mut table = MembershipTable::new();
        table.register(&Category::new("NOUN"), "libro", None);
        table.register(&Category::new("NOUN"), "mundo", None);
        table.ensure_category(&Category::new("VERB"));

        let stats = Statistics::new(3, 1, &table);
        assert_eq!(stats.processed(), 2);

        let report = stats.to_string();
        assert!(report.contains("Processed lexemes: 2 (66.67%)"));
        assert!(report.contains("Unprocessed lexemes: 1 (33.33%)"));
        assert!(report.ends_with("NOUN: 2 lexemes\nVERB: 0 lexemes\n"));
    }
}
