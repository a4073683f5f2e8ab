//! Fixed sample data for demos and tests.

use rusqlite::Connection;
use tracing::info;

use super::items::add_item;
use super::lists::add_list;
use super::schema::{initialize, SCHEMA};
use crate::error::Result;
use crate::models::NewItem;

/// Lists and their item names, inserted in this order.
pub const SEED_DATA: &[(&str, &[&str])] = &[
    ("breakfast", &["eggs", "spam", "ham"]),
    ("lunch", &["spamwich"]),
    ("supper", &["spamalot"]),
];

/// Insert [`SEED_DATA`] through the regular data access functions.
pub fn prepopulate_tables(conn: &mut Connection) -> Result<()> {
    for (list, items) in SEED_DATA {
        let list_id = add_list(conn, list)?;
        for item in *items {
            add_item(conn, list_id, &NewItem::named(*item))?;
        }
    }
    Ok(())
}

/// Drop and recreate every table, then optionally load the sample data.
pub fn reset(conn: &mut Connection, populate: bool) -> Result<()> {
    initialize(conn, SCHEMA, true)?;
    if populate {
        prepopulate_tables(conn)?;
    }

    info!(populate, "store reset");
    Ok(())
}
