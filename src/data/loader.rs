//! CSV Schedule Loader Module
//! Reads a schedule table with Polars and converts it into task rows.

use crate::data::task::{
    BATCH_COLUMN, DURATION_COLUMN, RESOURCE_COLUMNS, START_COLUMN, TASK_COLUMN,
};
use crate::data::{BatchKey, TaskRow};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Missing value in column {column} at row {row}")]
    MissingValue { column: String, row: usize },
}

/// Loads schedule tables with the columns
/// `Task, Start, Duration, Batch, Resource 1, Resource 2, Resource 3`.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<Vec<TaskRow>, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let rows = Self::rows_from_dataframe(&df)?;
        log::info!("Loaded {} tasks from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Convert a DataFrame into task rows, preserving row order.
    pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<TaskRow>, LoaderError> {
        let tasks = Self::string_values(df, TASK_COLUMN)?;
        let starts = Self::float_values(df, START_COLUMN)?;
        let durations = Self::float_values(df, DURATION_COLUMN)?;
        let batches = Self::batch_values(df)?;
        let mut resources = Vec::with_capacity(RESOURCE_COLUMNS.len());
        for name in RESOURCE_COLUMNS {
            resources.push(Self::string_values(df, name)?);
        }

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let start = starts[i].ok_or_else(|| Self::missing(START_COLUMN, i))?;
            let duration = durations[i].ok_or_else(|| Self::missing(DURATION_COLUMN, i))?;

            let mut row = TaskRow::new(tasks[i].clone().unwrap_or_default(), start, duration);
            row.batch = batches[i].clone();
            for (slot, column) in resources.iter().enumerate() {
                row.resources[slot] = column[i].clone().filter(|r| !r.is_empty());
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
        df.column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))
    }

    fn missing(column: &str, row: usize) -> LoaderError {
        LoaderError::MissingValue {
            column: column.to_string(),
            row,
        }
    }

    fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let casted = Self::column(df, name)?.cast(&DataType::String)?;
        let series = casted.as_materialized_series();
        let ca = series.str()?;
        Ok((0..ca.len())
            .map(|i| ca.get(i).map(|s| s.to_string()))
            .collect())
    }

    fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let casted = Self::column(df, name)?.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok((0..ca.len()).map(|i| ca.get(i)).collect())
    }

    /// Integer columns give integer keys. Float columns with whole values are
    /// treated as integers too, since gaps widen integer columns to floats.
    fn batch_values(df: &DataFrame) -> Result<Vec<Option<BatchKey>>, LoaderError> {
        let col = Self::column(df, BATCH_COLUMN)?;
        match col.dtype() {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => {
                let casted = col.cast(&DataType::Int64)?;
                let ca = casted.i64()?;
                Ok((0..ca.len()).map(|i| ca.get(i).map(BatchKey::Int)).collect())
            }
            DataType::Float32 | DataType::Float64 => {
                let values = Self::float_values(df, BATCH_COLUMN)?;
                Ok(values
                    .into_iter()
                    .map(|v| {
                        v.filter(|v| !v.is_nan()).map(|v| {
                            if v.fract() == 0.0 {
                                BatchKey::Int(v as i64)
                            } else {
                                BatchKey::Label(v.to_string())
                            }
                        })
                    })
                    .collect())
            }
            _ => Ok(Self::string_values(df, BATCH_COLUMN)?
                .into_iter()
                .map(|v| v.map(BatchKey::Label))
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_in_order() {
        let file = write_csv(
            "Task,Start,Duration,Batch,Resource 1,Resource 2,Resource 3\n\
             A,0,5,1,R1,,\n\
             B,5,3,2,R1,R2,\n",
        );

        let rows = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].task, "A");
        assert_eq!(rows[0].start, 0.0);
        assert_eq!(rows[0].duration, 5.0);
        assert_eq!(rows[0].batch, Some(BatchKey::Int(1)));
        assert_eq!(rows[0].resources, [Some("R1".to_string()), None, None]);

        assert_eq!(rows[1].task, "B");
        assert_eq!(rows[1].batch, Some(BatchKey::Int(2)));
        assert_eq!(
            rows[1].resources,
            [Some("R1".to_string()), Some("R2".to_string()), None]
        );
    }

    #[test]
    fn text_batches_become_labels() {
        let file = write_csv(
            "Task,Start,Duration,Batch,Resource 1,Resource 2,Resource 3\n\
             Rinse,1.5,2,cleanup,F&P,,\n",
        );

        let rows = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(rows[0].batch, Some(BatchKey::from("cleanup")));
        assert_eq!(rows[0].start, 1.5);
        assert_eq!(rows[0].resources[0].as_deref(), Some("F&P"));
    }

    #[test]
    fn whole_float_batches_become_integers() {
        let df = df!(
            "Task" => ["A", "B", "C"],
            "Start" => [0.0, 1.0, 2.0],
            "Duration" => [1.0, 1.0, 1.0],
            "Batch" => [Some(3.0), None, Some(2.5)],
            "Resource 1" => [Some("R1"), Some("R2"), Some("R3")],
            "Resource 2" => [None::<&str>, None, None],
            "Resource 3" => [None::<&str>, None, Some("")],
        )
        .unwrap();

        let rows = DataLoader::rows_from_dataframe(&df).unwrap();
        assert_eq!(rows[0].batch, Some(BatchKey::Int(3)));
        assert_eq!(rows[1].batch, None);
        assert_eq!(rows[2].batch, Some(BatchKey::from("2.5")));
        assert_eq!(rows[2].resources[2], None);
    }

    #[test]
    fn reports_missing_column() {
        let file = write_csv("Task,Start,Duration,Batch,Resource 1\nA,0,5,1,R1\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Resource 2"));
    }

    #[test]
    fn reports_missing_start() {
        let df = df!(
            "Task" => ["A"],
            "Start" => [None::<f64>],
            "Duration" => [1.0],
            "Batch" => [1i64],
            "Resource 1" => ["R1"],
            "Resource 2" => [None::<&str>],
            "Resource 3" => [None::<&str>],
        )
        .unwrap();

        let err = DataLoader::rows_from_dataframe(&df).unwrap_err();
        assert!(
            matches!(err, LoaderError::MissingValue { ref column, row: 0 } if column == "Start")
        );
    }
}
