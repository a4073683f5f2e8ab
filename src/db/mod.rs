//! Persistence module split across logical submodules.

mod connection;
mod items;
mod lists;
pub mod row;
mod schema;
mod seed;

pub use connection::{
    enable_foreign_keys, foreign_keys_enabled, open_in_memory, open_store, with_transaction,
};
pub use items::{add_item, delete_item, show_item};
pub use lists::{
    add_list, delete_list, list_id_from_name, list_lists, list_name, show_list, show_list_by_name,
};
pub use row::{FromRecord, Record};
pub use schema::{initialize, table_exists, ColumnDef, TableDef, SCHEMA};
pub use seed::{prepopulate_tables, reset, SEED_DATA};
