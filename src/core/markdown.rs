//! Pipe-table rendering for projected datasets.
//!
//! The layout follows the common dataframe `to_markdown` output: a leading
//! row-index column, numeric columns right aligned on the decimal point,
//! everything else left aligned, and every column at least two characters
//! wider than its header.

use crate::domain::model::ProjectedDataset;
use serde_json::Value;

const MIN_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Decimal,
}

struct Column {
    header: String,
    cells: Vec<String>,
    align: Align,
}

impl Column {
    fn new(header: String, values: Vec<Option<&Value>>) -> Self {
        let numeric = values
            .iter()
            .flatten()
            .filter(|v| !v.is_null())
            .all(|v| v.is_number())
            && values.iter().flatten().any(|v| v.is_number());

        let mut cells: Vec<String> = values.into_iter().map(format_cell).collect();
        let align = if numeric {
            align_decimals(&mut cells);
            Align::Decimal
        } else {
            Align::Left
        };

        Self {
            header,
            cells,
            align,
        }
    }

    fn index(rows: usize) -> Self {
        Self {
            header: String::new(),
            cells: (0..rows).map(|i| i.to_string()).collect(),
            align: Align::Decimal,
        }
    }

    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.chars().count())
            .chain(std::iter::once(self.header.chars().count() + MIN_PADDING))
            .max()
            .unwrap_or(MIN_PADDING)
    }

    fn pad(&self, text: &str, width: usize) -> String {
        match self.align {
            Align::Left => format!("{:<width$}", text, width = width),
            Align::Decimal => format!("{:>width$}", text, width = width),
        }
    }

    fn separator(&self, width: usize) -> String {
        match self.align {
            Align::Left => format!(":{}", "-".repeat(width + 1)),
            Align::Decimal => format!("{}:", "-".repeat(width + 1)),
        }
    }
}

fn format_cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

/// Pads fractional parts so decimal points line up once right aligned.
fn align_decimals(cells: &mut [String]) {
    let fraction_len = |cell: &str| cell.find('.').map_or(0, |dot| cell.len() - dot);
    let widest = cells.iter().map(|c| fraction_len(c.as_str())).max().unwrap_or(0);
    if widest == 0 {
        return;
    }
    for cell in cells.iter_mut().filter(|c| !c.is_empty()) {
        let missing = widest - fraction_len(cell.as_str());
        cell.push_str(&" ".repeat(missing));
    }
}

fn row(columns: &[Column], widths: &[usize], cells: impl Iterator<Item = String>) -> String {
    let padded: Vec<String> = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, width), cell)| column.pad(&cell, *width))
        .collect();
    format!("| {} |", padded.join(" | "))
}

pub fn render_markdown_table(dataset: &ProjectedDataset) -> String {
    let mut columns = vec![Column::index(dataset.len())];
    for name in &dataset.columns {
        let values = dataset.records.iter().map(|r| r.get(name)).collect();
        columns.push(Column::new(name.clone(), values));
    }

    let widths: Vec<usize> = columns.iter().map(Column::width).collect();

    let mut lines = Vec::with_capacity(dataset.len() + 2);
    lines.push(row(
        &columns,
        &widths,
        columns.iter().map(|c| c.header.clone()),
    ));

    let separators: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| column.separator(*width))
        .collect();
    lines.push(format!("|{}|", separators.join("|")));

    for i in 0..dataset.len() {
        lines.push(row(
            &columns,
            &widths,
            columns.iter().map(|c| c.cells[i].clone()),
        ));
    }

    lines.join("\n")
}
