//! Explicit table model decorated by the display updater.
//!
//! The original dashboard rewrote rendered `<td>` elements in place; here
//! the rendered table is a value the updater mutates, and cells carry an
//! optional stable binding so identity substitution does not have to
//! re-parse visible text.

use std::collections::BTreeSet;

use mixwatch_resolve::{PathSegment, StyleClass};

/// Presentational class attached to a table cell. The first three mirror
/// the identity classes; `True`/`False` are the boolean highlight pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellClass {
    Mixer,
    Gatekeeper,
    Client,
    True,
    False,
}

impl From<StyleClass> for CellClass {
    fn from(class: StyleClass) -> Self {
        match class {
            StyleClass::Mixer => Self::Mixer,
            StyleClass::Gatekeeper => Self::Gatekeeper,
            StyleClass::Client => Self::Client,
        }
    }
}

impl From<mixwatch_protocol::NodeRole> for CellClass {
    fn from(role: mixwatch_protocol::NodeRole) -> Self {
        StyleClass::from(role).into()
    }
}

/// Stable data binding attached to a cell at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellBinding {
    /// Raw endpoint address this cell displays; the identity pass
    /// resolves the binding instead of sniffing the cell text.
    Endpoint(String),
}

/// One table cell: visible text plus its class set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub classes: BTreeSet<CellClass>,
    pub binding: Option<CellBinding>,
    /// Pre-styled hop segments for routing-path cells.
    pub segments: Vec<PathSegment>,
}

impl TableCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Cell displaying a raw endpoint address, bound for resolution.
    pub fn endpoint(address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            text: address.clone(),
            binding: Some(CellBinding::Endpoint(address)),
            ..Default::default()
        }
    }

    /// Boolean cell; the boolean styling pass picks up the text.
    pub fn flag(value: bool) -> Self {
        Self::plain(if value { "true" } else { "false" })
    }

    /// Cell with a class already attached at render time.
    pub fn styled(text: impl Into<String>, class: CellClass) -> Self {
        let mut cell = Self::plain(text);
        cell.classes.insert(class);
        cell
    }

    /// Routing-path cell: arrow-joined text plus per-hop styling.
    pub fn route(segments: Vec<PathSegment>) -> Self {
        Self {
            text: mixwatch_resolve::routing_path_text(&segments),
            segments,
            ..Default::default()
        }
    }

    pub fn add_class(&mut self, class: CellClass) {
        self.classes.insert(class);
    }

    pub fn remove_class(&mut self, class: CellClass) {
        self.classes.remove(&class);
    }

    pub fn has_class(&self, class: CellClass) -> bool {
        self.classes.contains(&class)
    }
}

/// A rendered status table: titled, with a fixed column header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

impl StatusTable {
    pub fn new(title: &str, columns: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<TableCell>) {
        self.rows.push(row);
    }

    /// Mutable walk over every cell, row by row.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.rows.iter_mut().flatten()
    }
}
