//! Plain-text formatting for menu output.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::{self, Write};

use crossterm::style::Stylize;

use super::menu::{MenuAction, Outcome};
use crate::error::ShlistError;
use crate::models::{ItemDetail, ListContents, WishList};

pub(crate) fn render_menu<W: Write>(out: &mut W, actions: &BTreeMap<u32, MenuAction>) -> io::Result<()> {
    writeln!(out)?;
    for (number, action) in actions {
        writeln!(out, "{number}: {}", action.label())?;
    }
    Ok(())
}

pub(crate) fn render_lists<W: Write>(out: &mut W, lists: &[WishList]) -> io::Result<()> {
    writeln!(out, "Lists:")?;
    for list in lists {
        writeln!(out, "{list}")?;
    }
    Ok(())
}

fn render_list<W: Write>(out: &mut W, contents: &ListContents) -> io::Result<()> {
    writeln!(out, "{}:", contents.name)?;
    for item in &contents.items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

fn render_item<W: Write>(out: &mut W, item: &ItemDetail) -> io::Result<()> {
    field(out, "list", item.list.as_deref())?;
    field(out, "id", Some(item.id))?;
    field(out, "list_id", item.list_id)?;
    field(out, "name", Some(&item.name))?;
    field(out, "description", item.description.as_deref())?;
    field(out, "url", item.url.as_deref())?;
    field(out, "price", item.price)
}

fn field<W: Write, T: Display>(out: &mut W, name: &str, value: Option<T>) -> io::Result<()> {
    match value {
        Some(value) => writeln!(out, "{name}: {value}"),
        None => writeln!(out, "{name}: (none)"),
    }
}

pub(crate) fn render_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Lists(lists) => render_lists(out, lists),
        Outcome::List(contents) => render_list(out, contents),
        Outcome::Item(item) => render_item(out, item),
        Outcome::ListCreated(id) => writeln!(out, "created list #{id}"),
        Outcome::ItemCreated(id) => writeln!(out, "created item #{id}"),
        Outcome::ItemDeleted(id, 0) => writeln!(out, "no item #{id}"),
        Outcome::ItemDeleted(id, _) => writeln!(out, "deleted item #{id}"),
        Outcome::ListDeleted(id) => writeln!(out, "deleted list #{id} and its items"),
        Outcome::Reset => writeln!(out, "store reset with sample data"),
        Outcome::Exit => Ok(()),
    }
}

/// `Error: <message>`, with a red prefix when `color` is set.
pub(crate) fn render_error<W: Write>(out: &mut W, err: &ShlistError, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{} {err}", "Error:".red().bold())
    } else {
        writeln!(out, "Error: {err}")
    }
}
