//! Embedding table ingestion.
//!
//! Reads a CSV export in which every row carries an `embedding` column (a
//! bracketed list of numbers such as `[0.12, -0.4, ...]`) plus arbitrary
//! metadata columns. Each metadata column gets one type, the way a dataframe
//! JSON export types it: integer when every non-empty cell is an integer,
//! float when every one is a number, otherwise string. Empty cells become
//! `null`.

mod error;

pub use error::EmbeddingError;

use ndarray::Array2;
use serde_json::{Map, Number, Value};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Name of the column holding the embedding vector.
pub const EMBEDDING_COLUMN: &str = "embedding";

/// One row of the embedding table.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    /// Metadata columns in file order, including the raw `embedding` text
    pub metadata: Map<String, Value>,
    /// Parsed embedding vector
    pub embedding: Vec<f64>,
}

/// All rows of an embedding CSV, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    columns: Vec<String>,
    records: Vec<EmbeddingRecord>,
}

impl EmbeddingTable {
    /// Read a table from a CSV file.
    pub fn read_csv(path: &Path) -> Result<Self, EmbeddingError> {
        info!(path = %path.display(), "Reading embedding table");
        let file = std::fs::File::open(path).map_err(|source| EmbeddingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Read a table from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EmbeddingError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let embedding_index = columns
            .iter()
            .position(|c| c == EMBEDDING_COLUMN)
            .ok_or(EmbeddingError::MissingColumn(EMBEDDING_COLUMN))?;

        // Types are decided per column, so every row is read before any is typed
        let raw_rows = csv_reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, _>>()?;
        let column_types: Vec<ColumnType> = (0..columns.len())
            .map(|index| {
                if index == embedding_index {
                    ColumnType::Text
                } else {
                    ColumnType::infer(
                        raw_rows
                            .iter()
                            .map(|raw| raw.get(index).unwrap_or_default()),
                    )
                }
            })
            .collect();

        let mut records = Vec::with_capacity(raw_rows.len());
        for (row, raw) in raw_rows.iter().enumerate() {
            let mut metadata = Map::with_capacity(columns.len());
            for ((column, column_type), cell) in
                columns.iter().zip(&column_types).zip(raw.iter())
            {
                metadata.insert(column.clone(), column_type.value(cell));
            }

            let cell = raw.get(embedding_index).unwrap_or_default();
            let embedding = parse_vector(cell).map_err(|reason| {
                EmbeddingError::InvalidVector { row, reason }
            })?;

            records.push(EmbeddingRecord {
                metadata,
                embedding,
            });
        }

        debug!(rows = records.len(), columns = columns.len(), "Parsed embedding table");
        Ok(Self { columns, records })
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[EmbeddingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension, taken from the first row.
    pub fn dimension(&self) -> Option<usize> {
        self.records.first().map(|r| r.embedding.len())
    }

    /// Stack the embeddings into an N×D matrix.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, if the first vector is empty, or if any
    /// row's vector length differs from the first row's.
    pub fn matrix(&self) -> Result<Array2<f64>, EmbeddingError> {
        let dimension = match self.dimension() {
            None => return Err(EmbeddingError::Empty),
            Some(0) => {
                return Err(EmbeddingError::InvalidVector {
                    row: 0,
                    reason: "embedding has no components".to_string(),
                })
            }
            Some(d) => d,
        };

        let mut flat = Vec::with_capacity(self.records.len() * dimension);
        for (row, record) in self.records.iter().enumerate() {
            if record.embedding.len() != dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    row,
                    expected: dimension,
                    found: record.embedding.len(),
                });
            }
            flat.extend_from_slice(&record.embedding);
        }

        Array2::from_shape_vec((self.records.len(), dimension), flat)
            .map_err(|e| EmbeddingError::Shape(e.to_string()))
    }
}

/// Parse a bracketed list literal into a vector of floats.
///
/// Accepts the JSON array syntax produced when a float list is written to a
/// CSV cell, e.g. `[0.1, -2.5e-3, 7]`.
pub fn parse_vector(text: &str) -> Result<Vec<f64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("embedding cell is empty".to_string());
    }
    serde_json::from_str::<Vec<f64>>(trimmed).map_err(|e| e.to_string())
}

/// JSON type shared by every cell of a metadata column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    /// Narrowest type that fits every non-empty cell of a column.
    ///
    /// A column with no values at all stays `Integer`; its cells are all null.
    fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut column_type = ColumnType::Integer;
        for cell in cells.into_iter().filter(|c| !c.is_empty()) {
            if column_type == ColumnType::Integer && cell.parse::<i64>().is_err() {
                column_type = ColumnType::Float;
            }
            if column_type == ColumnType::Float && cell.parse::<f64>().is_err() {
                return ColumnType::Text;
            }
        }
        column_type
    }

    /// Convert one cell. Empty cells and non-finite floats become null.
    fn value(self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnType::Integer => cell.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            ColumnType::Float => cell
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
            ColumnType::Text => Value::String(cell.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,ProductId,Score,Summary,n_tokens,embedding
0,B003XPF9BO,5,\"Good, tasty\",52,\"[0.5, -1.0, 2.0]\"
1,B003JK537S,1,Arrived broken,178,\"[1.5, 0.0, -2.0]\"
";

    #[test]
    fn test_reads_columns_and_rows() {
        let table = EmbeddingTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            table.columns(),
            ["", "ProductId", "Score", "Summary", "n_tokens", "embedding"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), Some(3));
        assert_eq!(table.records()[0].embedding, vec![0.5, -1.0, 2.0]);
        assert_eq!(table.records()[1].embedding, vec![1.5, 0.0, -2.0]);
    }

    #[test]
    fn test_metadata_is_typed() {
        let table = EmbeddingTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let metadata = &table.records()[0].metadata;

        assert_eq!(metadata["ProductId"], Value::String("B003XPF9BO".into()));
        assert_eq!(metadata["Score"], Value::from(5));
        assert_eq!(metadata["Summary"], Value::String("Good, tasty".into()));
        assert_eq!(metadata["n_tokens"], Value::from(52));
        assert_eq!(
            metadata["embedding"],
            Value::String("[0.5, -1.0, 2.0]".into())
        );
    }

    #[test]
    fn test_metadata_keeps_column_order() {
        let table = EmbeddingTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let keys: Vec<&String> = table.records()[1].metadata.keys().collect();
        assert_eq!(
            keys,
            ["", "ProductId", "Score", "Summary", "n_tokens", "embedding"]
        );
    }

    #[test]
    fn test_column_type_inference() {
        assert_eq!(ColumnType::infer(["1", "-12", ""]), ColumnType::Integer);
        assert_eq!(ColumnType::infer(["1", "2.5"]), ColumnType::Float);
        assert_eq!(ColumnType::infer(["2.5", "abc", "3"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(["", ""]), ColumnType::Integer);
    }

    #[test]
    fn test_column_type_values() {
        assert_eq!(ColumnType::Integer.value(""), Value::Null);
        assert_eq!(ColumnType::Integer.value("-12"), Value::from(-12));
        assert_eq!(ColumnType::Float.value("3"), Value::from(3.0));
        assert_eq!(ColumnType::Float.value("NaN"), Value::Null);
        assert_eq!(ColumnType::Text.value("0042"), Value::String("0042".into()));
    }

    #[test]
    fn test_numeric_looking_ids_stay_strings() {
        let csv = "\
ProductId,Score,embedding
B001E4KFG0,5,\"[1.0, 0.0]\"
0006641040,4,\"[0.0, 1.0]\"
";
        let table = EmbeddingTable::from_reader(csv.as_bytes()).unwrap();
        let ids: Vec<&Value> = table
            .records()
            .iter()
            .map(|r| &r.metadata["ProductId"])
            .collect();

        assert_eq!(
            ids,
            [
                &Value::String("B001E4KFG0".into()),
                &Value::String("0006641040".into())
            ]
        );
        assert_eq!(table.records()[1].metadata["Score"], Value::from(4));
    }

    #[test]
    fn test_mixed_numeric_column_becomes_float() {
        let csv = "helpfulness,note,embedding\n1,,\"[1.0]\"\n0.5,seen,\"[2.0]\"\n";
        let table = EmbeddingTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.records()[0].metadata["helpfulness"], Value::from(1.0));
        assert_eq!(table.records()[1].metadata["helpfulness"], Value::from(0.5));
        assert_eq!(table.records()[0].metadata["note"], Value::Null);
        assert_eq!(table.records()[1].metadata["note"], Value::String("seen".into()));
    }

    #[test]
    fn test_missing_embedding_column() {
        let csv = "id,text\n1,hello\n";
        let result = EmbeddingTable::from_reader(csv.as_bytes());
        assert!(matches!(
            result.unwrap_err(),
            EmbeddingError::MissingColumn("embedding")
        ));
    }

    #[test]
    fn test_invalid_vector_reports_row() {
        let csv = "id,embedding\n1,\"[1.0, 2.0]\"\n2,\"[1.0, oops]\"\n";
        let result = EmbeddingTable::from_reader(csv.as_bytes());
        assert!(matches!(
            result.unwrap_err(),
            EmbeddingError::InvalidVector { row: 1, .. }
        ));
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector(" [1, -2.5e-1] ").unwrap(), vec![1.0, -0.25]);
        assert!(parse_vector("").is_err());
        assert!(parse_vector("1, 2").is_err());
    }

    #[test]
    fn test_matrix_shape() {
        let table = EmbeddingTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let matrix = table.matrix().unwrap();

        assert_eq!(matrix.dim(), (2, 3));
        assert_eq!(matrix[[1, 0]], 1.5);
        assert_eq!(matrix[[0, 2]], 2.0);
    }

    #[test]
    fn test_matrix_dimension_mismatch() {
        let csv = "id,embedding\n1,\"[1.0, 2.0]\"\n2,\"[1.0]\"\n";
        let table = EmbeddingTable::from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(
            table.matrix().unwrap_err(),
            EmbeddingError::DimensionMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_matrix_empty_table() {
        let csv = "id,embedding\n";
        let table = EmbeddingTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(matches!(table.matrix().unwrap_err(), EmbeddingError::Empty));
    }

    #[test]
    fn test_read_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = EmbeddingTable::read_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = EmbeddingTable::read_csv(&dir.path().join("missing.csv"));
        assert!(matches!(result.unwrap_err(), EmbeddingError::Io { .. }));
    }
}
