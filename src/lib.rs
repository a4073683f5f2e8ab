//! Core library surface for the shlist wishlist catalog.
//!
//! The persistence layer (`db`) is usable on its own; the `ui` module drives
//! it from a numbered text menu. Both take the store connection explicitly,
//! there is no process-wide handle.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

/// Store setup and the data access functions most callers need.
pub use db::{
    add_item, add_list, delete_item, delete_list, initialize, list_id_from_name, list_lists,
    open_in_memory, open_store, reset, show_item, show_list, SCHEMA,
};

pub use config::Config;
pub use error::{Result, ShlistError};

/// Domain records handed out by the persistence layer.
pub use models::{ItemDetail, ItemSummary, ListContents, NewItem, WishList};

/// The interactive menu.
pub use ui::{Menu, MenuAction, MenuState};
