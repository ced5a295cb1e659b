use crate::config::ColumnConfig;
use crate::error::SourceError;
use crate::models::{CellValue, StudentRow};

/// Hands over the first worksheet as a rectangular grid of cells, header row included.
pub trait SheetSource {
    fn read_table(&mut self) -> Result<Vec<Vec<CellValue>>, SourceError>;
}

impl SheetSource for Vec<Vec<CellValue>> {
    fn read_table(&mut self) -> Result<Vec<Vec<CellValue>>, SourceError> {
        Ok(self.clone())
    }
}

/// Map sheet rows to [`StudentRow`]s, discarding the header. Cells past the
/// end of a short row read as empty.
pub fn rows_from_table(table: &[Vec<CellValue>], columns: &ColumnConfig) -> Vec<StudentRow> {
    let (name_idx, mark_idx, obs_idx) = columns.zero_based();
    table
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, cells)| {
            let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
            StudentRow {
                row_number: i + 1,
                name: cell(name_idx).display(),
                mark: cell(mark_idx),
                observation: obs_idx.map(|idx| cell(idx).display()).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn header_discarded_and_columns_are_one_based() {
        let table = vec![
            vec![text("Alumno"), text("Nota"), text("Obs")],
            vec![text("Ana Maria Garcia Lopez"), text("8 Notable")],
            vec![text("Joan Perez"), CellValue::Number(6.0), text("Buen trabajo")],
        ];
        let rows = rows_from_table(&table, &ColumnConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].name, "Ana Maria Garcia Lopez");
        assert_eq!(rows[0].mark, text("8 Notable"));
        assert_eq!(rows[0].observation, "");
        assert_eq!(rows[1].mark, CellValue::Number(6.0));
        assert_eq!(rows[1].observation, "Buen trabajo");
    }

    #[test]
    fn custom_columns_and_disabled_observation() {
        let table = vec![
            vec![text("Obs"), text("Nota"), text("Nombre")],
            vec![text("Bien"), text("9"), text("Pau Ruiz")],
        ];
        let columns = ColumnConfig {
            name_column: 3,
            mark_column: 2,
            observation_column: None,
        };
        let rows = rows_from_table(&table, &columns);
        assert_eq!(rows[0].name, "Pau Ruiz");
        assert_eq!(rows[0].mark, text("9"));
        assert_eq!(rows[0].observation, "");
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let table = vec![vec![text("Alumno"), text("Nota")]];
        assert!(rows_from_table(&table, &ColumnConfig::default()).is_empty());
        assert!(rows_from_table(&[], &ColumnConfig::default()).is_empty());
    }
}
