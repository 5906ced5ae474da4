use crate::model::Employee;

/// Worksheet name of the export
pub const SHEET_NAME: &str = "Employees";

/// Exported columns, in record field order. The id is never exported.
pub const COLUMNS: [&str; 5] = ["name", "email", "position", "department", "salary"];

/// A single cell of the export table
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
    }
}

/// In-memory tabular snapshot of the record store
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotTable {
    rows: Vec<Vec<Cell>>,
}

impl SnapshotTable {
    pub fn sheet_name(&self) -> &'static str {
        SHEET_NAME
    }

    pub fn headers(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Data rows, header excluded
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_for(employee: &Employee) -> Vec<Cell> {
    vec![
        Cell::Text(employee.name.clone()),
        Cell::Text(employee.email.clone()),
        Cell::text(employee.position.as_deref()),
        Cell::text(employee.department.as_deref()),
        employee.salary.map_or(Cell::Empty, Cell::Number),
    ]
}

/// Build the export table from a full scan of the store
///
/// One row per record, in the order given. An empty scan yields a table
/// with headers and zero rows.
pub fn build_snapshot(records: &[Employee]) -> SnapshotTable {
    SnapshotTable {
        rows: records.iter().map(row_for).collect(),
    }
}
