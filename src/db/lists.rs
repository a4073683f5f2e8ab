use rusqlite::{params, Connection};
use tracing::info;

use super::connection::with_transaction;
use super::row::{query_as, query_first_as, query_records};
use crate::error::{Result, ShlistError};
use crate::models::{ItemSummary, ListContents, WishList};

/// Insert a new list and return its id. Names are not validated; empty and
/// duplicate names are accepted.
pub fn add_list(conn: &mut Connection, name: &str) -> Result<i64> {
    let id = with_transaction(conn, |tx| {
        tx.execute("INSERT INTO list (name) VALUES (?1)", params![name])?;
        Ok(tx.last_insert_rowid())
    })?;

    info!(list_id = id, name, "created list");
    Ok(id)
}

/// Id of a list with exactly this name.
///
/// When several lists share the name, whichever row the store returns first
/// wins. That is not guaranteed to be the oldest one.
pub fn list_id_from_name(conn: &Connection, name: &str) -> Result<i64> {
    let records = query_records(conn, "SELECT id FROM list WHERE name = ?1", params![name])?;
    let record = records
        .first()
        .ok_or_else(|| ShlistError::NotFound(format!("list {name:?}")))?;
    record.get("id")
}

/// Name of the list with this id. Interactive list selection uses this to
/// confirm a typed number before any write is attempted.
pub fn list_name(conn: &Connection, id: i64) -> Result<String> {
    query_first_as::<WishList, _>(conn, "SELECT id, name FROM list WHERE id = ?1", params![id])?
        .map(|list| list.name)
        .ok_or_else(|| ShlistError::NotFound(format!("list #{id}")))
}

/// Every list, in the store's natural order. The query has no `ORDER BY`;
/// list order carries no meaning, and for a rowid table the natural order is
/// normally insertion order.
pub fn list_lists(conn: &Connection) -> Result<Vec<WishList>> {
    query_as(conn, "SELECT id, name FROM list", [])
}

/// A list's name and the items that belong to it.
///
/// The name is looked up first so an unknown id fails with `NotFound` rather
/// than looking like an empty list. Items come back as id/name pairs only;
/// [`show_item`](super::show_item) fetches the full record.
pub fn show_list(conn: &Connection, id: i64) -> Result<ListContents> {
    let name = list_name(conn, id)?;
    let items: Vec<ItemSummary> = query_as(
        conn,
        "SELECT id, name FROM item WHERE list_id = ?1",
        params![id],
    )?;

    Ok(ListContents { name, items })
}

/// [`show_list`] for the list found by [`list_id_from_name`].
pub fn show_list_by_name(conn: &Connection, name: &str) -> Result<ListContents> {
    let id = list_id_from_name(conn, name)?;
    show_list(conn, id)
}

/// Delete a list together with every item that references it.
///
/// The items are removed explicitly in the same transaction as the list, so
/// the cascade does not depend on the connection's foreign-key setting.
/// Deleting an id that does not exist changes nothing.
pub fn delete_list(conn: &mut Connection, id: i64) -> Result<()> {
    let (items_removed, lists_removed) = with_transaction(conn, |tx| {
        let items = tx.execute("DELETE FROM item WHERE list_id = ?1", params![id])?;
        let lists = tx.execute("DELETE FROM list WHERE id = ?1", params![id])?;
        Ok((items, lists))
    })?;

    info!(list_id = id, lists_removed, items_removed, "deleted list");
    Ok(())
}
