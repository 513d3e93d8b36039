//! Monthly Report
//!
//! Buckets expenses by their rendered month label and sums each bucket.
//! Groups keep the order in which their label was first seen, and expenses
//! keep their original relative order inside a group.

use std::collections::HashMap;

use serde::Serialize;

use super::labels::MonthLabeler;
use crate::display::{format_expense_card, DisplayStyle};
use crate::models::{Amount, Expense};

/// Expenses sharing one month label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    /// Rendered month label, e.g. "March 2024"
    pub label: String,
    /// Sum of the group's amounts
    pub subtotal: Amount,
    /// Expenses in encounter order
    pub expenses: Vec<Expense>,
}

impl MonthGroup {
    fn new(label: String) -> Self {
        Self {
            label,
            subtotal: Amount::zero(),
            expenses: Vec::new(),
        }
    }

    /// Subtotals clamp at the decimal range; a month can exceed it even when
    /// the overall total does not.
    fn push(&mut self, expense: &Expense) {
        self.subtotal = self.subtotal.saturating_add(expense.amount());
        self.expenses.push(expense.clone());
    }
}

/// Ordered mapping from month label to [`MonthGroup`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    groups: Vec<MonthGroup>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MonthlyReport {
    /// Group expenses by month label in a single pass
    pub fn generate(expenses: &[Expense], labeler: &MonthLabeler) -> Self {
        let mut report = Self::default();

        for expense in expenses {
            let label = labeler.label(expense.date());
            let slot = match report.index.get(&label) {
                Some(&slot) => slot,
                None => {
                    let slot = report.groups.len();
                    report.index.insert(label.clone(), slot);
                    report.groups.push(MonthGroup::new(label));
                    slot
                }
            };
            report.groups[slot].push(expense);
        }

        report
    }

    /// Groups in first-appearance order
    pub fn groups(&self) -> &[MonthGroup] {
        &self.groups
    }

    /// Look up a group by its label
    pub fn get(&self, label: &str) -> Option<&MonthGroup> {
        self.index.get(label).map(|&slot| &self.groups[slot])
    }

    /// Labels in first-appearance order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.label.as_str())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of all subtotals
    pub fn total(&self) -> Amount {
        self.groups.iter().map(|g| g.subtotal).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, style: &DisplayStyle) -> String {
        if self.groups.is_empty() {
            return "No expenses recorded.\n".to_string();
        }

        let mut output = String::new();

        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&group.label);
            output.push('\n');
            output.push_str(&format!("Total: {}\n", style.amount(group.subtotal)));

            for expense in &group.expenses {
                output.push('\n');
                output.push_str(&format_expense_card(expense, style));
            }
        }

        output
    }
}

impl<'a> IntoIterator for &'a MonthlyReport {
    type Item = &'a MonthGroup;
    type IntoIter = std::slice::Iter<'a, MonthGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
