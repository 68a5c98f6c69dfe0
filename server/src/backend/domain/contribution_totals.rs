//! Totals, payer counts and averages over contribution records.

use crate::backend::domain::models::contribution::{Contribution, ContributionCategory};

/// Sum of the amounts present on one record
pub fn total(contribution: &Contribution) -> f64 {
    ContributionCategory::ALL
        .iter()
        .filter_map(|c| contribution.amount(*c))
        .sum()
}

/// Sum of record totals, 0 for no records
pub fn total_across(contributions: &[Contribution]) -> f64 {
    contributions.iter().map(total).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    pub category: ContributionCategory,
    /// Records with an amount above zero
    pub payers: usize,
    pub total_amount: f64,
}

impl CategoryTotals {
    /// Rounded mean per payer, `None` when nobody paid
    pub fn average(&self) -> Option<f64> {
        if self.payers == 0 {
            return None;
        }
        Some((self.total_amount / self.payers as f64).round())
    }
}

pub fn category_totals(contributions: &[Contribution]) -> Vec<CategoryTotals> {
    ContributionCategory::ALL
        .iter()
        .map(|category| {
            let amounts: Vec<f64> = contributions
                .iter()
                .filter_map(|c| c.amount(*category))
                .collect();
            CategoryTotals {
                category: *category,
                payers: amounts.iter().filter(|a| **a > 0.0).count(),
                total_amount: amounts.iter().sum(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionTotals {
    pub record_count: usize,
    pub total_amount: f64,
    /// Sum of payers over all categories
    pub total_contributors: usize,
    pub categories: Vec<CategoryTotals>,
}

pub fn summarize(contributions: &[Contribution]) -> ContributionTotals {
    let categories = category_totals(contributions);
    ContributionTotals {
        record_count: contributions.len(),
        total_amount: total_across(contributions),
        total_contributors: categories.iter().map(|c| c.payers).sum(),
        categories,
    }
}
