//! Declarative table definitions and the code that applies them to a
//! connection.

use rusqlite::Connection;
use tracing::{debug, info};

use super::connection::{enable_foreign_keys, with_transaction};
use crate::error::Result;

/// One column: name, storage type, and an optional trailing constraint clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub constraint: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            constraint: None,
        }
    }

    pub const fn with(name: &'static str, sql_type: &'static str, constraint: &'static str) -> Self {
        Self {
            name,
            sql_type,
            constraint: Some(constraint),
        }
    }

    fn sql(&self) -> String {
        match self.constraint {
            Some(constraint) => format!("{} {} {}", self.name, self.sql_type, constraint),
            None => format!("{} {}", self.name, self.sql_type),
        }
    }
}

/// A table name and its columns in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    /// `CREATE TABLE IF NOT EXISTS` statement for this table.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDef::sql)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }
}

/// The wishlist schema. Parents come before the tables that reference them.
pub const SCHEMA: &[TableDef] = &[
    TableDef {
        name: "list",
        columns: &[
            ColumnDef::with("id", "INTEGER", "PRIMARY KEY AUTOINCREMENT"),
            ColumnDef::with("name", "TEXT", "NOT NULL"),
        ],
    },
    TableDef {
        name: "item",
        columns: &[
            ColumnDef::with("id", "INTEGER", "PRIMARY KEY AUTOINCREMENT"),
            ColumnDef::with("list_id", "INTEGER", "REFERENCES list(id) ON DELETE CASCADE"),
            ColumnDef::with("name", "TEXT", "NOT NULL"),
            ColumnDef::new("description", "TEXT"),
            ColumnDef::new("url", "TEXT"),
            ColumnDef::new("price", "INTEGER"),
        ],
    },
];

/// Bring the store in line with `schema`.
///
/// With `force`, every declared table is dropped first (children before
/// parents, missing tables are fine). Tables are then created if absent. The
/// whole pass runs in one transaction, so a failure leaves the previous
/// structure untouched.
pub fn initialize(conn: &mut Connection, schema: &[TableDef], force: bool) -> Result<()> {
    enable_foreign_keys(conn)?;

    with_transaction(conn, |tx| {
        if force {
            for table in schema.iter().rev() {
                tx.execute(&format!("DROP TABLE IF EXISTS {}", table.name), [])?;
                debug!(table = table.name, "dropped table");
            }
        }

        for table in schema {
            let existed = table_exists(tx, table.name)?;
            tx.execute(&table.create_sql(), [])?;
            if !existed {
                debug!(table = table.name, "created table");
            }
        }

        Ok(())
    })?;

    info!(tables = schema.len(), force, "schema initialized");
    Ok(())
}

/// Whether a table called `name` exists in the main database.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
