//! Table accumulation.
//!
//! The collector buffers cell contents (inline tokens) as the table events
//! stream past; at `table_close` the builder renders the grid and
//! [`flush`] turns it into a [`Table`] block.

use crate::ir::nodes::{RowRole, Run, Table, TableRow};
use crate::ir::token::Token;

/// Inline tokens of one cell.
pub type CellTokens = Vec<Token>;

#[derive(Debug, Default)]
pub struct TableCollector {
    grid: Vec<Vec<CellTokens>>,
    row: Option<Vec<CellTokens>>,
    cell: Option<CellTokens>,
    in_header: bool,
    header_rows: usize,
}

impl TableCollector {
    /// Start a new table, dropping anything buffered.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_header(&mut self, in_header: bool) {
        self.in_header = in_header;
    }

    /// Rows closed while inside `thead` so far.
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn start_row(&mut self) {
        self.row = Some(Vec::new());
    }

    pub fn end_row(&mut self) {
        if let Some(row) = self.row.take() {
            if self.in_header {
                self.header_rows += 1;
            }
            self.grid.push(row);
        }
    }

    pub fn start_cell(&mut self) {
        self.cell = Some(Vec::new());
    }

    pub fn end_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(Vec::new).push(cell);
        }
    }

    /// Buffer an inline token into the open cell. Returns false, leaving the
    /// token to the caller, when no cell is open.
    pub fn push_inline(&mut self, token: &Token) -> bool {
        match self.cell.as_mut() {
            Some(cell) => {
                cell.push(token.clone());
                true
            }
            None => false,
        }
    }

    /// Take the buffered grid, leaving the collector empty.
    pub fn take_grid(&mut self) -> Vec<Vec<CellTokens>> {
        let grid = std::mem::take(&mut self.grid);
        self.reset();
        grid
    }
}

/// Build a table from rendered cells.
///
/// Row 0 is the header; data rows at even indices carry the zebra fill.
/// Returns `None` for an empty grid or a grid with no cells at all.
///
/// `column_count` is the widest row, so no row is ever cut short; narrower
/// rows keep their own length.
pub fn flush(grid: Vec<Vec<Vec<Run>>>) -> Option<Table> {
    let column_count = grid.iter().map(Vec::len).max().unwrap_or(0);
    if column_count == 0 {
        return None;
    }

    let rows = grid
        .into_iter()
        .enumerate()
        .map(|(index, cells)| TableRow {
            role: row_role(index),
            cells,
        })
        .collect();

    Some(Table {
        rows,
        column_count,
        header_row_index: 0,
    })
}

fn row_role(index: usize) -> RowRole {
    match index {
        0 => RowRole::Header,
        i if i % 2 == 0 => RowRole::Zebra,
        _ => RowRole::Body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(texts: &[&str]) -> Vec<Vec<Run>> {
        texts.iter().map(|t| vec![Run::text(*t)]).collect()
    }

    #[test]
    fn header_and_zebra_rows() {
        let table = flush(vec![
            cells(&["a", "b"]),
            cells(&["1", "2"]),
            cells(&["3", "4"]),
        ])
        .unwrap();
        assert_eq!(table.column_count, 2);
        assert_eq!(table.header_row_index, 0);
        let roles: Vec<_> = table.rows.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![RowRole::Header, RowRole::Body, RowRole::Zebra]);
    }

    #[test]
    fn short_rows_are_not_padded() {
        let table = flush(vec![cells(&["a", "b", "c"]), cells(&["1"])]).unwrap();
        assert_eq!(table.column_count, 3);
        assert_eq!(table.rows[1].cells.len(), 1);
    }

    #[test]
    fn header_rows_count_rows_inside_thead() {
        let mut collector = TableCollector::default();
        collector.set_header(true);
        collector.start_row();
        collector.end_row();
        collector.set_header(false);
        collector.start_row();
        collector.end_row();
        assert_eq!(collector.header_rows(), 1);
        collector.take_grid();
        assert_eq!(collector.header_rows(), 0);
    }

    #[test]
    fn widest_row_sets_column_count() {
        let table = flush(vec![cells(&["a"]), cells(&["1", "2", "3"])]).unwrap();
        assert_eq!(table.column_count, 3);
        assert_eq!(table.rows[0].cells.len(), 1);
        assert_eq!(table.rows[1].cells.len(), 3);
    }

    #[test]
    fn empty_grids_produce_nothing() {
        assert!(flush(Vec::new()).is_none());
        assert!(flush(vec![Vec::new(), Vec::new()]).is_none());
    }

    #[test]
    fn collector_buffers_cells_into_rows() {
        let mut collector = TableCollector::default();
        collector.start_row();
        collector.start_cell();
        assert!(collector.push_inline(&Token::inline(vec![Token::text("x")])));
        collector.end_cell();
        collector.end_row();
        assert!(!collector.push_inline(&Token::text("outside")));

        assert_eq!(collector.header_rows(), 0);
        let grid = collector.take_grid();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 1);
        assert_eq!(grid[0][0].len(), 1);
        assert!(collector.take_grid().is_empty());
    }
}
