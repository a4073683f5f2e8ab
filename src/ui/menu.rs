//! Numbered-menu controller.
//!
//! Each cycle goes Idle (print the menu) -> AwaitingAction (read a number)
//! -> Dispatching (gather arguments, run the command, print the result) and
//! back to Idle. Only the `exit` action, or closing standard input, reaches
//! Terminated.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use rusqlite::Connection;
use tracing::{debug, warn};

use super::prompt::Prompt;
use super::render::{render_error, render_lists, render_menu, render_outcome};
use crate::db::{
    add_item, add_list, delete_item, delete_list, list_lists, list_name, reset, show_item,
    show_list,
};
use crate::error::{Result, ShlistError};
use crate::models::{ItemDetail, ListContents, NewItem, WishList};

/// The entries offered by the menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ListLists,
    ShowList,
    ShowItem,
    CreateList,
    CreateItem,
    DeleteItem,
    DeleteList,
    Reset,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ListLists,
        MenuAction::ShowList,
        MenuAction::ShowItem,
        MenuAction::CreateList,
        MenuAction::CreateItem,
        MenuAction::DeleteItem,
        MenuAction::DeleteList,
        MenuAction::Reset,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ListLists => "list lists",
            MenuAction::ShowList => "show list",
            MenuAction::ShowItem => "show item detail",
            MenuAction::CreateList => "create list",
            MenuAction::CreateItem => "create item",
            MenuAction::DeleteItem => "delete item",
            MenuAction::DeleteList => "delete list",
            MenuAction::Reset => "reset",
            MenuAction::Exit => "exit",
        }
    }
}

/// A menu action with its arguments already collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListLists,
    ShowList { list_id: i64 },
    ShowItem { item_id: i64 },
    CreateList { name: String },
    CreateItem { list_id: i64, item: NewItem },
    DeleteItem { item_id: i64 },
    DeleteList { list_id: i64 },
    Reset { populate: bool },
    Exit,
}

/// What a command produced, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Lists(Vec<WishList>),
    List(ListContents),
    Item(ItemDetail),
    ListCreated(i64),
    ItemCreated(i64),
    /// Item id and how many rows were removed (zero when it did not exist).
    ItemDeleted(i64, usize),
    ListDeleted(i64),
    Reset,
    Exit,
}

/// Run one command against the store.
pub fn execute(conn: &mut Connection, command: Command) -> Result<Outcome> {
    match command {
        Command::ListLists => Ok(Outcome::Lists(list_lists(conn)?)),
        Command::ShowList { list_id } => Ok(Outcome::List(show_list(conn, list_id)?)),
        Command::ShowItem { item_id } => Ok(Outcome::Item(show_item(conn, item_id)?)),
        Command::CreateList { name } => Ok(Outcome::ListCreated(add_list(conn, &name)?)),
        Command::CreateItem { list_id, item } => {
            Ok(Outcome::ItemCreated(add_item(conn, list_id, &item)?))
        }
        Command::DeleteItem { item_id } => {
            let removed = delete_item(conn, item_id)?;
            Ok(Outcome::ItemDeleted(item_id, removed))
        }
        Command::DeleteList { list_id } => {
            delete_list(conn, list_id)?;
            Ok(Outcome::ListDeleted(list_id))
        }
        Command::Reset { populate } => {
            reset(conn, populate)?;
            Ok(Outcome::Reset)
        }
        Command::Exit => Ok(Outcome::Exit),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Idle,
    AwaitingAction,
    Dispatching(MenuAction),
    Terminated,
}

/// Interactive loop that owns the store connection for the whole session.
pub struct Menu<R, W> {
    conn: Connection,
    prompt: Prompt<R, W>,
    actions: BTreeMap<u32, MenuAction>,
    state: MenuState,
    color: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(conn: Connection, input: R, output: W) -> Self {
        let actions = (1..).zip(MenuAction::ALL).collect();
        Self {
            conn,
            prompt: Prompt::new(input, output),
            actions,
            state: MenuState::Idle,
            color: false,
        }
    }

    /// Color the `Error:` prefix. Meant for interactive terminals.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Ask questions through `dialoguer` instead of reading raw lines.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.prompt = self.prompt.with_interactive(interactive);
        self
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn actions(&self) -> &BTreeMap<u32, MenuAction> {
        &self.actions
    }

    /// Map a typed selection to an action. Anything that is not one of the
    /// offered numbers is a [`ShlistError::Menu`].
    pub fn resolve(&self, selection: &str) -> Result<MenuAction> {
        let selection = selection.trim();
        selection
            .parse::<u32>()
            .ok()
            .and_then(|number| self.actions.get(&number).copied())
            .ok_or_else(|| ShlistError::Menu(selection.to_string()))
    }

    /// Advance the state machine by one transition and return the new state.
    ///
    /// Menu and record errors are returned after the state has gone back to
    /// Idle, so the caller can report them and keep stepping.
    pub fn step(&mut self) -> Result<MenuState> {
        let next = match self.state {
            MenuState::Idle => {
                render_menu(self.prompt.output(), &self.actions)?;
                MenuState::AwaitingAction
            }
            MenuState::AwaitingAction => {
                self.state = MenuState::Idle;
                let action = match self.prompt.ask_selection("action") {
                    Ok(selection) => self.resolve(&selection)?,
                    // stdin closed: leave as if `exit` was chosen
                    Err(ShlistError::EndOfInput) => MenuAction::Exit,
                    Err(err) => return Err(err),
                };
                MenuState::Dispatching(action)
            }
            MenuState::Dispatching(action) => {
                self.state = MenuState::Idle;
                debug!(action = action.label(), "dispatching");
                match self.dispatch(action) {
                    Ok(Outcome::Exit) | Err(ShlistError::EndOfInput) => MenuState::Terminated,
                    Ok(_) => MenuState::Idle,
                    Err(err) => return Err(err.into_record_error()),
                }
            }
            MenuState::Terminated => MenuState::Terminated,
        };

        self.state = next;
        Ok(next)
    }

    /// Step until Terminated, printing recoverable errors along the way.
    /// Any other error ends the loop and is returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(MenuState::Terminated) => return Ok(()),
                Ok(_) => {}
                Err(err) if err.is_recoverable() => {
                    warn!(error = %err, "menu action failed");
                    render_error(self.prompt.output(), &err, self.color)?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Hand back the connection and output once the session is over.
    pub fn into_parts(self) -> (Connection, W) {
        let (_, output) = self.prompt.into_parts();
        (self.conn, output)
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<Outcome> {
        writeln!(self.prompt.output())?;
        let command = self.prepare(action)?;
        let outcome = execute(&mut self.conn, command)?;
        render_outcome(self.prompt.output(), &outcome)?;
        Ok(outcome)
    }

    /// Collect the arguments an action needs from the user.
    fn prepare(&mut self, action: MenuAction) -> Result<Command> {
        let command = match action {
            MenuAction::ListLists => Command::ListLists,
            MenuAction::ShowList => Command::ShowList {
                list_id: self.select_list()?.0,
            },
            MenuAction::ShowItem => Command::ShowItem {
                item_id: self.prompt.ask_number("item number")?,
            },
            MenuAction::CreateList => Command::CreateList {
                name: self.prompt.ask("list name")?,
            },
            MenuAction::CreateItem => {
                let (list_id, _) = self.select_list()?;
                Command::CreateItem {
                    list_id,
                    item: self.define_item()?,
                }
            }
            MenuAction::DeleteItem => Command::DeleteItem {
                item_id: self.prompt.ask_number("item number")?,
            },
            MenuAction::DeleteList => Command::DeleteList {
                list_id: self.select_list()?.0,
            },
            MenuAction::Reset => Command::Reset { populate: true },
            MenuAction::Exit => Command::Exit,
        };
        Ok(command)
    }

    /// Print the lists, read a list number, and confirm it exists.
    fn select_list(&mut self) -> Result<(i64, String)> {
        let lists = list_lists(&self.conn)?;
        render_lists(self.prompt.output(), &lists)?;
        let id = self.prompt.ask_number("list #")?;
        let name = list_name(&self.conn, id)?;
        Ok((id, name))
    }

    /// Prompt for the item fields in schema order.
    fn define_item(&mut self) -> Result<NewItem> {
        Ok(NewItem {
            name: self.prompt.ask("name")?,
            description: self.prompt.ask_optional("description")?,
            url: self.prompt.ask_optional("url")?,
            price: self.prompt.ask_optional_number("price")?,
        })
    }
}
