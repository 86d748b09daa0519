// Widget metadata - Execution results attached to widgets at read time
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column name to cell value for one data row, in column order.
pub type Record = IndexMap<String, String>;

/// An action result parsed as CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub headers: Vec<String>,
    /// Cell values per row in column order, taken from `data`.
    pub rows: Vec<Vec<String>>,
    pub data: Vec<Record>,
}

impl ResultTable {
    pub fn new(headers: Vec<String>, data: Vec<Record>) -> Self {
        let rows = data
            .iter()
            .map(|record| record.values().cloned().collect())
            .collect();

        Self {
            headers,
            rows,
            data,
        }
    }
}

/// Either a parsed table or the raw result text when it was not valid CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metadata {
    Table(ResultTable),
    Raw(String),
}

impl Metadata {
    pub fn as_table(&self) -> Option<&ResultTable> {
        match self {
            Metadata::Table(table) => Some(table),
            Metadata::Raw(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_column_order() {
        let mut record = Record::new();
        record.insert("b".to_string(), "2".to_string());
        record.insert("a".to_string(), "1".to_string());

        let table = ResultTable::new(vec!["b".to_string(), "a".to_string()], vec![record]);
        assert_eq!(table.rows, vec![vec!["2".to_string(), "1".to_string()]]);
    }

    #[test]
    fn test_short_record_yields_short_row() {
        let mut record = Record::new();
        record.insert("a".to_string(), "1".to_string());

        let headers = vec!["a".to_string(), "b".to_string()];
        let table = ResultTable::new(headers, vec![record]);
        assert_eq!(table.rows, vec![vec!["1".to_string()]]);
    }

    #[test]
    fn test_records_serialize_in_column_order() {
        let mut record = Record::new();
        record.insert("b".to_string(), "2".to_string());
        record.insert("a".to_string(), "1".to_string());

        let table = ResultTable::new(vec!["b".to_string(), "a".to_string()], vec![record]);
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"headers":["b","a"],"rows":[["2","1"]],"data":[{"b":"2","a":"1"}]}"#
        );
    }

    #[test]
    fn test_raw_metadata_serializes_as_plain_string() {
        let metadata = Metadata::Raw("oops".to_string());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), "\"oops\"");
        assert!(metadata.as_table().is_none());
    }
}
