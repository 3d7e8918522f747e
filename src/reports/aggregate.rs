//! Aggregation primitives
//!
//! Pure functions over a loaded table: totals, group-by sums and the
//! due/overdue split for expenses.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::models::{Expense, Money, Record};
use crate::storage::Table;

/// Sum of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    /// Exact column value shared by the group
    pub key: String,
    pub total: Money,
    /// Number of rows in the group
    pub count: usize,
}

/// Sum of the amount column; zero for an empty table
pub fn total<R: Record>(rows: &[R]) -> Money {
    rows.iter().map(|row| row.amount()).sum()
}

/// Sum the amount column per distinct value of `column`
///
/// Groups are compared by exact string equality and returned sorted by key.
pub fn group_sum<R: Record>(rows: &[R], column: R::Column) -> Vec<GroupTotal> {
    let mut groups: BTreeMap<String, (Money, usize)> = BTreeMap::new();

    for row in rows {
        let entry = groups
            .entry(row.value(column))
            .or_insert((Money::zero(), 0));
        entry.0 += row.amount();
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect()
}

/// Whether an expense is still payable or already past due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Pending,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "OVERDUE",
            Self::Pending => "PENDING",
        }
    }
}

/// Expenses split by due date relative to a reference day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuePartition {
    pub as_of: NaiveDate,
    /// Due on or after `as_of` (or without a due date), ascending by due date
    pub pending: Vec<Expense>,
    /// Due before `as_of`, ascending by due date
    pub overdue: Vec<Expense>,
}

impl DuePartition {
    /// Rows in display order: overdue first, then pending
    pub fn display_order(&self) -> impl Iterator<Item = (DueStatus, &Expense)> {
        self.overdue
            .iter()
            .map(|e| (DueStatus::Overdue, e))
            .chain(self.pending.iter().map(|e| (DueStatus::Pending, e)))
    }

    pub fn pending_total(&self) -> Money {
        total(&self.pending)
    }

    pub fn overdue_total(&self) -> Money {
        total(&self.overdue)
    }
}

/// Split expenses into pending (due on or after `as_of`) and overdue
///
/// Expenses without a due date count as pending and sort after dated ones.
pub fn overdue_partition(table: &Table<Expense>, as_of: NaiveDate) -> DuePartition {
    let (mut overdue, mut pending): (Vec<Expense>, Vec<Expense>) = table
        .rows
        .iter()
        .cloned()
        .partition(|expense| expense.is_overdue(as_of));

    // `None` sorts before `Some`, so map missing dates to the far end
    let due_key = |e: &Expense| e.due_date.unwrap_or(NaiveDate::MAX);
    overdue.sort_by_key(due_key);
    pending.sort_by_key(due_key);

    DuePartition {
        as_of,
        pending,
        overdue,
    }
}

/// [`overdue_partition`] relative to the current local date
pub fn overdue_partition_today(table: &Table<Expense>) -> DuePartition {
    overdue_partition(table, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseColumn, Sale, SaleColumn};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(cents: i64, partner: &str) -> Sale {
        Sale {
            date: Some(date(2025, 1, 10)),
            amount: Money::from_cents(cents),
            payment_method: "Transfer".into(),
            invoiced: "Invoiced".into(),
            partner: partner.into(),
        }
    }

    fn expense(due: Option<NaiveDate>, cents: i64) -> Expense {
        Expense {
            registration_date: Some(date(2025, 1, 1)),
            expense_type: "Servicio".into(),
            provider: "EPEC".into(),
            amount: Money::from_cents(cents),
            due_date: due,
            invoiced: "Not Invoiced".into(),
        }
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<Sale> = Vec::new();
        assert_eq!(total(&rows), Money::zero());
        assert!(group_sum(&rows, SaleColumn::Partner).is_empty());
    }

    #[test]
    fn test_group_sum_sorted_by_key() {
        let rows = vec![
            sale(1000, "Ignacio (Nacho)"),
            sale(15000, "Fernando"),
            sale(500, "Ignacio (Nacho)"),
        ];

        let groups = group_sum(&rows, SaleColumn::Partner);
        assert_eq!(
            groups,
            vec![
                GroupTotal {
                    key: "Fernando".into(),
                    total: Money::from_cents(15000),
                    count: 1,
                },
                GroupTotal {
                    key: "Ignacio (Nacho)".into(),
                    total: Money::from_cents(1500),
                    count: 2,
                },
            ]
        );
        assert_eq!(total(&rows), Money::from_cents(16500));
    }

    #[test]
    fn test_group_sum_exact_equality() {
        let rows = vec![sale(100, "fernando"), sale(100, "Fernando")];
        assert_eq!(group_sum(&rows, SaleColumn::Partner).len(), 2);
    }

    #[test]
    fn test_overdue_partition_order() {
        let table = Table::from_rows(vec![
            expense(Some(date(2030, 1, 1)), 200),
            expense(None, 50),
            expense(Some(date(2025, 1, 1)), 100),
            expense(Some(date(2025, 6, 1)), 300),
            expense(Some(date(2024, 12, 1)), 400),
        ]);

        let partition = overdue_partition(&table, date(2025, 6, 1));

        let overdue_dates: Vec<_> = partition.overdue.iter().map(|e| e.due_date).collect();
        assert_eq!(
            overdue_dates,
            vec![Some(date(2024, 12, 1)), Some(date(2025, 1, 1))]
        );

        let pending_dates: Vec<_> = partition.pending.iter().map(|e| e.due_date).collect();
        assert_eq!(
            pending_dates,
            vec![Some(date(2025, 6, 1)), Some(date(2030, 1, 1)), None]
        );

        let statuses: Vec<_> = partition.display_order().map(|(s, _)| s).collect();
        assert_eq!(statuses[0], DueStatus::Overdue);
        assert_eq!(statuses[2], DueStatus::Pending);

        assert_eq!(partition.overdue_total(), Money::from_cents(500));
        assert_eq!(partition.pending_total(), Money::from_cents(550));
    }

    #[test]
    fn test_group_sum_expenses_by_type() {
        let mut other = expense(Some(date(2025, 1, 1)), 50);
        other.expense_type = "Mercadería".into();
        let rows = vec![expense(Some(date(2025, 1, 1)), 100), other];

        let groups = group_sum(&rows, ExpenseColumn::ExpenseType);
        assert_eq!(groups[0].key, "Mercadería");
        assert_eq!(groups[1].key, "Servicio");
    }
}
