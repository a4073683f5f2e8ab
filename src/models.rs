//! Domain records returned by the persistence layer. They are plain data
//! holders; the menu formats them and the database layer fills them in from
//! named row records.

use std::fmt;

/// A named wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishList {
    /// Primary key assigned by the store.
    pub id: i64,
    /// Display name. Duplicates are allowed.
    pub name: String,
}

impl fmt::Display for WishList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

/// The id and name of an item, as shown when browsing a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for ItemSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

/// A list's name together with the items that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContents {
    pub name: String,
    pub items: Vec<ItemSummary>,
}

/// Every stored field of an item plus the name of its owning list.
///
/// `list` is `None` when the item's `list_id` is null or no longer points at a
/// list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail {
    pub list: Option<String>,
    pub id: i64,
    pub list_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Opaque integer; no currency or unit is implied.
    pub price: Option<i64>,
}

/// Field values for an item that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub price: Option<i64>,
}

impl NewItem {
    /// An item with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
