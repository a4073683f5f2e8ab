//! Row mapping: turns a result row plus the statement's column names into a
//! [`Record`] whose fields are looked up by name, so queries never pick values
//! out by position.

use std::rc::Rc;

use rusqlite::types::{FromSql, Value, ValueRef};
use rusqlite::{Connection, Params, Row};

use crate::error::{Result, ShlistError};
use crate::models::{ItemDetail, ItemSummary, WishList};

/// One result row with its values addressable by column name. Column order
/// and nulls are preserved exactly as the query produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Rc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Capture every column of `row`. The column list is shared between all
    /// records produced by the same statement.
    pub fn from_row(columns: &Rc<[String]>, row: &Row<'_>) -> rusqlite::Result<Self> {
        let values = (0..columns.len())
            .map(|idx| row.get::<_, Value>(idx))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Self {
            columns: Rc::clone(columns),
            values,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of the first column called `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|column| column == name)
            .map(|idx| &self.values[idx])
    }

    /// Convert the named column to `T`. Use `Option<T>` for nullable columns.
    pub fn get<T: FromSql>(&self, name: &str) -> Result<T> {
        let value = self.value(name).ok_or_else(|| ShlistError::Decode {
            column: name.to_string(),
            reason: "no such column".to_string(),
        })?;
        T::column_result(ValueRef::from(value)).map_err(|err| ShlistError::Decode {
            column: name.to_string(),
            reason: err.to_string(),
        })
    }

    /// `(column, value)` pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Types that can be built from a [`Record`].
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self>;
}

/// Run `sql` and map every returned row into a [`Record`].
pub fn query_records<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Rc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .into();

    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(Record::from_row(&columns, row)?);
    }

    Ok(records)
}

/// Run `sql` and decode every row as `T`.
pub fn query_as<T: FromRecord, P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<T>> {
    query_records(conn, sql, params)?
        .iter()
        .map(T::from_record)
        .collect()
}

/// Decode the first row as `T`, or `None` when the query returned nothing.
/// Callers that need exactly one row turn `None` into `NotFound` themselves.
pub fn query_first_as<T: FromRecord, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Option<T>> {
    query_records(conn, sql, params)?
        .first()
        .map(T::from_record)
        .transpose()
}

impl FromRecord for WishList {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(WishList {
            id: record.get("id")?,
            name: record.get("name")?,
        })
    }
}

impl FromRecord for ItemSummary {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(ItemSummary {
            id: record.get("id")?,
            name: record.get("name")?,
        })
    }
}

impl FromRecord for ItemDetail {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(ItemDetail {
            list: record.get("list")?,
            id: record.get("id")?,
            list_id: record.get("list_id")?,
            name: record.get("name")?,
            description: record.get("description")?,
            url: record.get("url")?,
            price: record.get("price")?,
        })
    }
}
