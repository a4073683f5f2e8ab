use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use tracing::{debug, info, warn};

use super::connection::with_transaction;
use super::row::query_first_as;
use crate::error::{Result, ShlistError};
use crate::models::{ItemDetail, NewItem};

/// Insert an item under `list_id` and return its id.
///
/// The list is not looked up first; the foreign key rejects an unknown
/// `list_id` and that surfaces as [`ShlistError::Integrity`]. The insert runs
/// in its own transaction so a rejected row never becomes visible.
pub fn add_item(conn: &mut Connection, list_id: i64, item: &NewItem) -> Result<i64> {
    let id = with_transaction(conn, |tx| {
        tx.execute(
            "INSERT INTO item (list_id, name, description, url, price)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![list_id, item.name, item.description, item.url, item.price],
        )
        .map_err(|err| map_constraint(err, list_id))?;
        Ok(tx.last_insert_rowid())
    })?;

    info!(item_id = id, list_id, name = %item.name, "created item");
    Ok(id)
}

/// Every field of an item plus its list's name. The list is read through a
/// left join in the same statement rather than a second lookup, so an item
/// whose `list_id` is null or points at a deleted list still comes back, with
/// `list: None`, instead of failing as if the item itself were missing. The
/// columns are aliased one by one so the row mapper sees `list` and the item's
/// own `name` as distinct fields.
pub fn show_item(conn: &Connection, id: i64) -> Result<ItemDetail> {
    query_first_as(
        conn,
        "SELECT list.name AS list, item.id AS id, item.list_id AS list_id,
                item.name AS name, item.description AS description,
                item.url AS url, item.price AS price
         FROM item
         LEFT JOIN list ON item.list_id = list.id
         WHERE item.id = ?1",
        params![id],
    )?
    .ok_or_else(|| ShlistError::NotFound(format!("item #{id}")))
}

/// Remove one item and return how many rows went away (0 or 1). An unknown
/// id is not an error, matching what a plain `DELETE` does; the count lets
/// the menu tell the user nothing matched instead of claiming success.
pub fn delete_item(conn: &mut Connection, id: i64) -> Result<usize> {
    let removed = with_transaction(conn, |tx| {
        Ok(tx.execute("DELETE FROM item WHERE id = ?1", params![id])?)
    })?;

    if removed == 0 {
        debug!(item_id = id, "delete_item matched no rows");
    } else {
        info!(item_id = id, "deleted item");
    }
    Ok(removed)
}

/// Turn SQLite constraint failures into [`ShlistError::Integrity`]. For item
/// inserts the only constraint a caller can trip is the list foreign key
/// (`name` is always bound), so the message names the list.
fn map_constraint(err: SqlError, list_id: i64) -> ShlistError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        warn!(list_id, error = %err, "item insert rejected by constraint");
        ShlistError::Integrity(format!("list #{list_id}"))
    } else {
        err.into()
    }
}
