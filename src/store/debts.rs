//! CRUD queries for the `debts` collection. Each method wraps one statement so
//! the UI layer never sees SQL. Records are immutable once written: there is
//! deliberately no update-in-place, only insert and delete.

use rusqlite::params;

use crate::models::{Debt, NewDebt};

use super::{DebtStore, StoreError};

impl DebtStore {
    /// Insert a new record and return the id the store assigned to it. The
    /// store does not validate field shapes; the commit form is responsible
    /// for refusing blank names and amounts before this is reached.
    pub fn add(&self, debt: &NewDebt) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO debts (who, cost, why) VALUES (?1, ?2, ?3)",
            params![debt.who, debt.cost, debt.why],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Retrieve every record in insertion order. The view layer reverses this
    /// for display; the store itself never re-sorts.
    pub fn list_all(&self) -> Result<Vec<Debt>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, who, cost, why FROM debts ORDER BY id")?;

        let debts = stmt
            .query_map([], |row| {
                Ok(Debt {
                    id: row.get(0)?,
                    who: row.get(1)?,
                    cost: row.get(2)?,
                    why: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(debts)
    }

    /// Delete the record with the given id. Removing an id that does not
    /// exist is a no-op, not an error; the caller re-reads full state after
    /// every mutation anyway.
    pub fn remove(&self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM debts WHERE id = ?1", params![id])?;
        Ok(())
    }
}
