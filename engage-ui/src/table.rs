//! Column-driven table rendering.
//!
//! A [`Table`] knows nothing about the records it shows. Each [`Column`]
//! supplies a header and a cell renderer; the table lays them out as a header
//! row followed by one row per record, in the order given. Filtering,
//! sorting and paging happen before the rows reach the table.

use std::sync::Arc;

use engage_dom::{Element, Justify, Size, Style, TextAlign, TextWrap};

use crate::theme;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

type CellRenderer<T> = Arc<dyn Fn(&T, usize) -> Element + Send + Sync>;

/// How one field of a record is shown.
pub struct Column<T> {
    /// Unique within a table; part of every cell id.
    pub key: String,
    pub header: String,
    pub align: TextAlign,
    /// Applied to the header cell and every body cell of the column.
    pub width: Option<Size>,
    render: CellRenderer<T>,
}

impl<T> Column<T> {
    /// `render` receives the record and its index among the rows passed to
    /// [`Table::render`].
    pub fn new<F>(key: impl Into<String>, header: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T, usize) -> Element + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            header: header.into(),
            align: TextAlign::Left,
            width: None,
            render: Arc::new(render),
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render_cell(&self, row: &T, index: usize) -> Element {
        (self.render)(row, index)
    }

    fn justify(&self) -> Justify {
        match self.align {
            TextAlign::Left => Justify::Start,
            TextAlign::Center => Justify::Center,
            TextAlign::Right => Justify::End,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            align: self.align,
            width: self.width,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("align", &self.align)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

pub struct Table<T> {
    id: String,
    columns: Vec<Column<T>>,
    empty_message: String,
}

impl<T> Table<T> {
    pub fn new(id: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self {
            id: id.into(),
            columns,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn header_id(&self) -> String {
        format!("{}-header", self.id)
    }

    pub fn body_id(&self) -> String {
        format!("{}-body", self.id)
    }

    pub fn row_id(&self, index: usize) -> String {
        format!("{}-row-{index}", self.id)
    }

    pub fn cell_id(&self, index: usize, key: &str) -> String {
        format!("{}-row-{index}-{key}", self.id)
    }

    pub fn empty_id(&self) -> String {
        format!("{}-empty", self.id)
    }

    /// Build the table for `rows`.
    ///
    /// The header is always present. With no rows the body holds the empty
    /// message once. Ids derive only from the table id, row index and column
    /// key, so the same input always yields an equal tree. A panicking cell
    /// renderer is not caught.
    pub fn render(&self, rows: &[T]) -> Element {
        let header = Element::row()
            .id(self.header_id())
            .width(Size::Fill)
            .gap(1)
            .style(Style::new().background(theme::SURFACE_RAISED))
            .children(self.columns.iter().map(|column| {
                Element::text(column.header.clone())
                    .id(format!("{}-header-{}", self.id, column.key))
                    .width(column.width.unwrap_or(Size::Fill))
                    .text_align(column.align)
                    .text_wrap(TextWrap::Truncate)
                    .style(Style::new().foreground(theme::TEXT_MUTED).bold())
            }));

        let body = if rows.is_empty() {
            Element::col().id(self.body_id()).width(Size::Fill).child(
                Element::text(self.empty_message.clone())
                    .id(self.empty_id())
                    .width(Size::Fill)
                    .text_align(TextAlign::Center)
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
        } else {
            Element::col()
                .id(self.body_id())
                .width(Size::Fill)
                .children(rows.iter().enumerate().map(|(index, row)| self.render_row(row, index)))
        };

        Element::col()
            .id(self.id.clone())
            .width(Size::Fill)
            .child(header)
            .child(body)
    }

    fn render_row(&self, row: &T, index: usize) -> Element {
        Element::row()
            .id(self.row_id(index))
            .width(Size::Fill)
            .gap(1)
            .children(self.columns.iter().map(|column| {
                Element::row()
                    .id(self.cell_id(index, &column.key))
                    .width(column.width.unwrap_or(Size::Fill))
                    .justify(column.justify())
                    .child(column.render_cell(row, index))
            }))
    }
}
