//! Distinct values and occurrence counts of a column.

use std::collections::HashMap;
use std::path::Path;

use etl_model::Level;

use crate::column::read_column_values;
use crate::error::Result;

/// Collapses raw column values into levels.
///
/// Values are trimmed and counted; levels keep the order in which each value
/// was first seen. Empty cells become a single empty-string level so the
/// segmenter can substitute the field's null placeholder.
pub fn levels_from_values<I, S>(values: I) -> Vec<Level>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut levels: Vec<Level> = Vec::new();
    for value in values {
        let value = value.as_ref().trim();
        match positions.get(value) {
            Some(&index) => levels[index].count += 1,
            None => {
                positions.insert(value.to_string(), levels.len());
                levels.push(Level::new(value, 1));
            }
        }
    }
    levels
}

/// Reads `column` from a CSV file and returns its levels.
pub fn read_column_levels(path: &Path, column: &str) -> Result<Vec<Level>> {
    let values = read_column_values(path, column)?;
    let levels = levels_from_values(&values);
    tracing::debug!(
        path = %path.display(),
        column,
        levels = levels.len(),
        "built column levels"
    );
    Ok(levels)
}
