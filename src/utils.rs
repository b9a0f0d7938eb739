//! Some utility functions

use serde::{Deserialize, Deserializer};

use crate::traits::TableRecord;

/// Deserializes a nullable column into the default value of its type, so that
/// displayed fields never carry an explicit null
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// A debug utility that pretty-prints the rows a list currently displays
pub fn print_row_table<R: TableRecord>(rows: &[R], total: usize) {
    for row in rows {
        println!("    #{}\t{}", row.id(), row.search_values().join(" | "));
    }
    println!("    ({} displayed, {} in the store)", rows.len(), total);
}
