//! Expense operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_amount, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, Expense, NewExpense, PaymentMode, UpdateExpense};
use crate::stats::DateWindow;

/// Filters for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Restrict to a month/year window
    pub window: Option<DateWindow>,
    /// Restrict to one category
    pub category: Option<Category>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let amount: String = row.get(3)?;
    let category: String = row.get(4)?;
    let date: String = row.get(5)?;
    let payment_mode: String = row.get(6)?;
    let created_at: String = row.get(8)?;

    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        amount: parse_amount(3, &amount)?,
        category: category.parse().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown category: {}", category).into(),
            )
        })?,
        date: date.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        payment_mode: payment_mode.parse().unwrap_or_default(),
        notes: row.get(7)?,
        created_at: parse_datetime(&created_at),
    })
}

const EXPENSE_COLUMNS: &str =
    "id, user_id, description, amount, category, date, payment_mode, notes, created_at";

impl Database {
    /// Insert an expense for a user, returning the stored row
    pub fn insert_expense(&self, user_id: i64, new: &NewExpense) -> Result<Expense> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (user_id, description, amount, category, date, payment_mode, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                new.description,
                new.amount.to_string(),
                new.category.as_str(),
                new.date.to_string(),
                new.payment_mode.as_str(),
                new.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_expense(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {} not found after insert", id)))
    }

    /// Fetch one expense, scoped to its owner
    pub fn get_expense(&self, user_id: i64, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM expenses WHERE id = ?1 AND user_id = ?2",
            EXPENSE_COLUMNS
        );
        Ok(conn
            .query_row(&sql, params![id, user_id], expense_from_row)
            .optional()?)
    }

    /// List a user's expenses, newest first
    pub fn list_expenses(&self, user_id: i64, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut sql = format!(
            "SELECT {} FROM expenses WHERE user_id = ?",
            EXPENSE_COLUMNS
        );
        let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(window) = filter.window {
            sql.push_str(" AND date BETWEEN ? AND ?");
            query_params.push(Box::new(window.start.to_string()));
            query_params.push(Box::new(window.end.to_string()));
        }
        if let Some(category) = filter.category {
            sql.push_str(" AND category = ?");
            query_params.push(Box::new(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY date DESC, id DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            query_params.push(Box::new(limit));
            if let Some(offset) = filter.offset {
                sql.push_str(" OFFSET ?");
                query_params.push(Box::new(offset));
            }
        }

        let param_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(param_refs.as_slice(), expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Apply a partial update to an expense, returning the stored row
    pub fn update_expense(
        &self,
        user_id: i64,
        id: i64,
        update: &UpdateExpense,
    ) -> Result<Expense> {
        let existing = self
            .get_expense(user_id, id)?
            .ok_or_else(|| Error::NotFound("Expense not found".to_string()))?;

        let description = update.description.as_ref().unwrap_or(&existing.description);
        let amount = update.amount.unwrap_or(existing.amount);
        let category = update.category.unwrap_or(existing.category);
        let date = update.date.unwrap_or(existing.date);
        let payment_mode = update.payment_mode.unwrap_or(existing.payment_mode);
        let notes = update.notes.as_ref().or(existing.notes.as_ref());

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE expenses
            SET description = ?1, amount = ?2, category = ?3, date = ?4, payment_mode = ?5, notes = ?6
            WHERE id = ?7 AND user_id = ?8
            "#,
            params![
                description,
                amount.to_string(),
                category.as_str(),
                date.to_string(),
                payment_mode.as_str(),
                notes,
                id,
                user_id,
            ],
        )?;
        drop(conn);

        self.get_expense(user_id, id)?
            .ok_or_else(|| Error::NotFound("Expense not found".to_string()))
    }

    /// Delete an expense, scoped to its owner
    pub fn delete_expense(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM expenses WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound("Expense not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn setup() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("Asha", "asha@example.com", "hash").unwrap();
        (db, user.id)
    }

    fn new_expense(amount: rust_decimal::Decimal, category: Category, date: &str) -> NewExpense {
        NewExpense {
            description: "test expense".to_string(),
            amount,
            category,
            date: date.parse().unwrap(),
            payment_mode: PaymentMode::default(),
            notes: None,
        }
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let (db, user_id) = setup();
        let inserted = db
            .insert_expense(
                user_id,
                &new_expense(dec!(249.99), Category::Shopping, "2026-03-14"),
            )
            .unwrap();

        let fetched = db.get_expense(user_id, inserted.id).unwrap().unwrap();
        assert_eq!(fetched.amount, dec!(249.99));
        assert_eq!(fetched.category, Category::Shopping);
        assert_eq!(
            fetched.date,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
        assert_eq!(fetched.payment_mode, PaymentMode::Upi);
    }

    #[test]
    fn test_list_is_scoped_to_owner() {
        let (db, user_id) = setup();
        let other = db.create_user("Ravi", "ravi@example.com", "hash").unwrap();

        db.insert_expense(
            user_id,
            &new_expense(dec!(100), Category::Transport, "2026-03-01"),
        )
        .unwrap();
        db.insert_expense(
            other.id,
            &new_expense(dec!(200), Category::Transport, "2026-03-01"),
        )
        .unwrap();

        let mine = db.list_expenses(user_id, &ExpenseFilter::default()).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].amount, dec!(100));
    }

    #[test]
    fn test_list_filters_by_window_and_category() {
        let (db, user_id) = setup();
        db.insert_expense(
            user_id,
            &new_expense(dec!(50), Category::FoodAndSnacks, "2026-02-15"),
        )
        .unwrap();
        db.insert_expense(
            user_id,
            &new_expense(dec!(60), Category::FoodAndSnacks, "2026-03-15"),
        )
        .unwrap();
        db.insert_expense(
            user_id,
            &new_expense(dec!(70), Category::Medical, "2026-03-20"),
        )
        .unwrap();

        let filter = ExpenseFilter {
            window: DateWindow::month(2026, 3),
            category: Some(Category::FoodAndSnacks),
            ..Default::default()
        };
        let found = db.list_expenses(user_id, &filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, dec!(60));
    }

    #[test]
    fn test_list_orders_newest_first() {
        let (db, user_id) = setup();
        db.insert_expense(
            user_id,
            &new_expense(dec!(10), Category::Others, "2026-03-01"),
        )
        .unwrap();
        db.insert_expense(
            user_id,
            &new_expense(dec!(20), Category::Others, "2026-03-05"),
        )
        .unwrap();

        let found = db.list_expenses(user_id, &ExpenseFilter::default()).unwrap();
        assert_eq!(found[0].amount, dec!(20));
        assert_eq!(found[1].amount, dec!(10));
    }

    #[test]
    fn test_partial_update() {
        let (db, user_id) = setup();
        let expense = db
            .insert_expense(
                user_id,
                &new_expense(dec!(500), Category::Entertainment, "2026-03-10"),
            )
            .unwrap();

        let update = UpdateExpense {
            amount: Some(dec!(450)),
            ..Default::default()
        };
        let updated = db.update_expense(user_id, expense.id, &update).unwrap();
        assert_eq!(updated.amount, dec!(450));
        assert_eq!(updated.category, Category::Entertainment);
        assert_eq!(updated.description, "test expense");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (db, user_id) = setup();
        let err = db
            .update_expense(user_id, 9999, &UpdateExpense::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_delete_scoped_to_owner() {
        let (db, user_id) = setup();
        let other = db.create_user("Ravi", "ravi@example.com", "hash").unwrap();
        let expense = db
            .insert_expense(
                user_id,
                &new_expense(dec!(5), Category::Others, "2026-03-01"),
            )
            .unwrap();

        // The other user cannot delete it
        assert!(matches!(
            db.delete_expense(other.id, expense.id).unwrap_err(),
            Error::NotFound(_)
        ));

        db.delete_expense(user_id, expense.id).unwrap();
        assert!(db.get_expense(user_id, expense.id).unwrap().is_none());
    }
}
