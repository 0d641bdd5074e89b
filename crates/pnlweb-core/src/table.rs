//! Table view-model consumed by the report templates

use crate::types::Variant;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
}

impl TableColumn {
    /// A sortable, left-aligned column
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            align: None,
            width: None,
            min_width: None,
        }
    }

    /// Right-aligned numeric column with a minimum width
    pub fn numeric(key: &str, label: &str, min_width: &str) -> Self {
        Self {
            align: Some(Align::Right),
            min_width: Some(min_width.to_string()),
            ..Self::new(key, label)
        }
    }

    pub fn width(mut self, width: &str) -> Self {
        self.width = Some(width.to_string());
        self
    }

    pub fn align_right(mut self) -> Self {
        self.align = Some(Align::Right);
        self
    }
}

/// Header spanning several columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnGroup {
    pub label: String,
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Name,
    Text,
    Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

impl TableCell {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Name,
            value: value.into(),
            variant: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Text,
            value: value.into(),
            variant: None,
        }
    }

    pub fn badge(value: impl Into<String>, variant: Variant) -> Self {
        Self {
            kind: CellKind::Badge,
            value: value.into(),
            variant: Some(variant),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<TableCell>,
    /// Raw sort/export values keyed by column
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data_attrs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<TableColumn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_groups: Vec<ColumnGroup>,
    pub rows: Vec<TableRow>,
    pub show_search: bool,
    pub show_filters: bool,
    pub show_sort: bool,
    pub show_columns: bool,
    pub show_export: bool,
    pub show_density: bool,
    pub show_entries: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort_direction: Option<SortDirection>,
    pub empty_state: EmptyState,
}

impl TableConfig {
    /// A table with every toolbar control enabled and no rows
    pub fn new(id: &str, empty_title: &str, empty_message: &str) -> Self {
        Self {
            id: id.to_string(),
            columns: Vec::new(),
            column_groups: Vec::new(),
            rows: Vec::new(),
            show_search: true,
            show_filters: true,
            show_sort: true,
            show_columns: true,
            show_export: true,
            show_density: true,
            show_entries: true,
            default_sort_column: None,
            default_sort_direction: None,
            empty_state: EmptyState {
                title: empty_title.to_string(),
                message: empty_message.to_string(),
            },
        }
    }

    pub fn without_search(mut self) -> Self {
        self.show_search = false;
        self
    }

    pub fn sorted_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.default_sort_column = Some(column.to_string());
        self.default_sort_direction = Some(direction);
        self
    }

    pub fn with_columns(mut self, columns: Vec<TableColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_column_groups(mut self, groups: Vec<ColumnGroup>) -> Self {
        self.column_groups = groups;
        self
    }

    pub fn with_rows(mut self, rows: Vec<TableRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Flat columns, whether declared directly or through groups
    pub fn all_columns(&self) -> Vec<&TableColumn> {
        if self.column_groups.is_empty() {
            self.columns.iter().collect()
        } else {
            self.column_groups.iter().flat_map(|g| g.columns.iter()).collect()
        }
    }
}

/// Build a `data_attrs` map from key/value pairs
pub fn data_attrs<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
