#[derive(Debug, Default)]
pub struct CsvTable {
    /// Every record of the file in order, header row included, one String per field.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field count shared by every row (0 for an empty table).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}
