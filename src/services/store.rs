//! Expense store
//!
//! The single source of truth for every expense recorded during a session.
//! The store is append-only: records go in through [`ExpenseStore::add`] or
//! [`ExpenseStore::push`] and are never edited or removed. Observers
//! registered with [`ExpenseStore::subscribe`] are called synchronously after
//! each successful append.

use std::fmt;

use tracing::debug;

use crate::error::ValidationError;
use crate::models::{Amount, Expense};
use crate::reports::{MonthLabeler, MonthlyReport};

/// Change notification delivered to observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreEvent<'a> {
    /// A record was appended
    ExpenseAdded {
        /// The record that was appended
        expense: &'a Expense,
        /// Running total after the append
        total: Amount,
        /// Number of records after the append
        count: usize,
    },
}

/// Handle returned by [`ExpenseStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent<'_>) + Send>;

/// In-memory, session-lifetime collection of expenses
#[derive(Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw input and append the resulting expense
    ///
    /// On failure the store is left untouched and no observer is called.
    /// An amount that would push the running total out of the decimal range
    /// is rejected as [`ValidationError::InvalidAmount`].
    pub fn add(
        &mut self,
        raw_name: &str,
        raw_amount: &str,
        raw_date: &str,
    ) -> Result<&Expense, ValidationError> {
        let expense = Expense::parse(raw_name, raw_amount, raw_date)?;
        let total = self
            .checked_total_with(&expense)
            .ok_or_else(|| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        Ok(self.append(expense, total))
    }

    /// Append an already-built expense
    ///
    /// Fails without touching the store when the running total would
    /// overflow.
    pub fn push(&mut self, expense: Expense) -> Result<&Expense, ValidationError> {
        let total = self
            .checked_total_with(&expense)
            .ok_or_else(|| ValidationError::InvalidAmount(expense.amount().to_string()))?;
        Ok(self.append(expense, total))
    }

    /// All expenses in insertion order
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sum of all amounts; zero when empty
    pub fn total(&self) -> Amount {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// Number of recorded expenses
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Group the current contents by month label
    pub fn group_by_month(&self, labeler: &MonthLabeler) -> MonthlyReport {
        MonthlyReport::generate(&self.expenses, labeler)
    }

    /// Register an observer called after every successful append
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn checked_total_with(&self, expense: &Expense) -> Option<Amount> {
        self.total().checked_add(expense.amount())
    }

    fn append(&mut self, expense: Expense, total: Amount) -> &Expense {
        let index = self.expenses.len();
        self.expenses.push(expense);
        self.notify_added(total);
        &self.expenses[index]
    }

    fn notify_added(&mut self, total: Amount) {
        let Some(expense) = self.expenses.last() else {
            return;
        };

        let event = StoreEvent::ExpenseAdded {
            expense,
            total,
            count: self.expenses.len(),
        };

        debug!(
            name = expense.name(),
            amount = %expense.amount(),
            date = %expense.date(),
            count = self.expenses.len(),
            observers = self.observers.len(),
            "expense added"
        );

        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("expenses", &self.expenses)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn store_with(entries: &[(&str, &str, &str)]) -> ExpenseStore {
        let mut store = ExpenseStore::new();
        for (name, amount, date) in entries {
            store.add(name, amount, date).unwrap();
        }
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ExpenseStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.list().is_empty());
        assert_eq!(store.total(), Amount::zero());
    }

    #[test]
    fn test_add_appends_to_end() {
        let mut store = store_with(&[("Coffee", "4.50", "2024-03-01")]);

        let added = store.add("Lunch", "12.00", "2024-03-15").unwrap().clone();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list().last(), Some(&added));
        assert_eq!(store.list()[0].name(), "Coffee");
    }

    #[test]
    fn test_total_sums_all_amounts() {
        let store = store_with(&[
            ("Coffee", "4.50", "2024-03-01"),
            ("Lunch", "12.00", "2024-03-15"),
            ("Rent", "900.00", "2024-04-02"),
        ]);
        assert_eq!(store.total(), Amount::from_cents(91650));
    }

    #[test]
    fn test_total_is_order_independent() {
        let forward = store_with(&[
            ("A", "0.10", "2024-01-01"),
            ("B", "0.20", "2024-02-01"),
            ("C", "-0.05", "2024-03-01"),
        ]);
        let backward = store_with(&[
            ("C", "-0.05", "2024-03-01"),
            ("B", "0.20", "2024-02-01"),
            ("A", "0.10", "2024-01-01"),
        ]);
        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total(), Amount::from_cents(25));
    }

    #[test]
    fn test_rejected_add_leaves_store_unchanged() {
        let mut store = store_with(&[("Coffee", "4.50", "2024-03-01")]);

        assert_eq!(
            store.add("", "1", "2024-03-01").unwrap_err(),
            ValidationError::EmptyName
        );
        assert!(matches!(
            store.add("Tea", "not-a-number", "2024-03-01"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            store.add("Tea", "1", "2024-13-40"),
            Err(ValidationError::InvalidDate(_))
        ));

        assert_eq!(store.len(), 1);
        assert_eq!(store.total(), Amount::from_cents(450));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let store = store_with(&[("Coffee", "4.50", "2024-03-01")]);
        assert_eq!(store.list().to_vec(), store.list().to_vec());
        assert_eq!(store.total(), store.total());
    }

    #[test]
    fn test_observers_notified_after_add() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = ExpenseStore::new();

        let sink = Arc::clone(&seen);
        store.subscribe(move |event| {
            let StoreEvent::ExpenseAdded {
                expense,
                total,
                count,
            } = event;
            sink.lock()
                .unwrap()
                .push((expense.name().to_string(), *total, *count));
        });

        store.add("Coffee", "4.50", "2024-03-01").unwrap();
        store.add("Lunch", "12", "2024-03-15").unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("Coffee".to_string(), Amount::from_cents(450), 1),
                ("Lunch".to_string(), Amount::from_cents(1650), 2),
            ]
        );
    }

    #[test]
    fn test_rejected_add_does_not_notify() {
        let calls = Arc::new(Mutex::new(0usize));
        let mut store = ExpenseStore::new();

        let counter = Arc::clone(&calls);
        store.subscribe(move |_| *counter.lock().unwrap() += 1);

        let _ = store.add("", "4.50", "2024-03-01");
        let _ = store.add("Coffee", "x", "2024-03-01");
        assert_eq!(*calls.lock().unwrap(), 0);

        store.add("Coffee", "4.50", "2024-03-01").unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut store = ExpenseStore::new();

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.subscribe(move |_| order.lock().unwrap().push(tag));
        }

        store.add("Coffee", "4.50", "2024-03-01").unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Arc::new(Mutex::new(0usize));
        let mut store = ExpenseStore::new();

        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.add("Coffee", "4.50", "2024-03-01").unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add("Lunch", "12", "2024-03-15").unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_push_typed_expense() {
        let mut store = ExpenseStore::new();
        let expense = Expense::parse("Rent", "900", "2024-04-02").unwrap();

        let stored = store.push(expense.clone()).unwrap();

        assert_eq!(stored, &expense);
        assert_eq!(store.total(), Amount::from_cents(90000));
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let calls = Arc::new(Mutex::new(0usize));
        let mut store = ExpenseStore::new();
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| *counter.lock().unwrap() += 1);

        let max = "79228162514264337593543950335";
        store.add("Big", max, "2024-03-01").unwrap();

        assert_eq!(
            store.add("Big2", "1", "2024-03-02").unwrap_err(),
            ValidationError::InvalidAmount("1".to_string())
        );
        let again = Expense::parse("Big3", max, "2024-03-03").unwrap();
        assert!(store.push(again).is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(*calls.lock().unwrap(), 1);

        // Bringing the total back down is still allowed
        store.add("Refund", "-1", "2024-03-04").unwrap();
        store.add("Small", "1", "2024-03-05").unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.total(), Amount::parse(max).unwrap());
    }
}
