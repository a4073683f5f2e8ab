use std::fs;
use std::path::Path;

use rusqlite::{Connection, Transaction};
use tracing::debug;

use super::schema::{initialize, SCHEMA};
use crate::error::Result;

/// Open (or create) the SQLite file at `path`, enable foreign keys, and make
/// sure the wishlist tables exist. Missing parent directories are created.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut conn = Connection::open(path)?;
    debug!(path = %path.display(), "opened store");
    prepare(&mut conn)?;
    Ok(conn)
}

/// Same as [`open_store`] but backed by a private in-memory database.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    prepare(&mut conn)?;
    Ok(conn)
}

fn prepare(conn: &mut Connection) -> Result<()> {
    enable_foreign_keys(conn)?;
    initialize(conn, SCHEMA, false)
}

/// Turn on foreign-key enforcement for this connection. SQLite ignores the
/// pragma inside an open transaction, so call it before starting one.
pub fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(())
}

/// Whether this connection currently enforces foreign keys.
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    let enabled: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
    Ok(enabled == 1)
}

/// Run `f` inside a transaction. It commits when `f` returns `Ok`; on `Err`
/// or a panic the transaction is dropped, which rolls it back.
pub fn with_transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShlistError;

    #[test]
    fn in_memory_store_enforces_foreign_keys() {
        let conn = open_in_memory().unwrap();
        assert!(foreign_keys_enabled(&conn).unwrap());
    }

    #[test]
    fn failed_closure_rolls_back() {
        let mut conn = open_in_memory().unwrap();
        let result: Result<()> = with_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO list (name) VALUES ('doomed')", [])?;
            Err(ShlistError::NotFound("on purpose".into()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM list", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn successful_closure_commits() {
        let mut conn = open_in_memory().unwrap();
        let id = with_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO list (name) VALUES ('kept')", [])?;
            Ok(tx.last_insert_rowid())
        })
        .unwrap();

        let name: String = conn
            .query_row("SELECT name FROM list WHERE id = ?1", [id], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "kept");
    }
}
