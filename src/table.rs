//! Tabular loader for delimited usage datasets
//!
//! The first line is the header row. Headers are trimmed and lower-cased and
//! their order defines column positions. Every following line is accepted
//! only when its field count equals the header count; anything else is
//! skipped without an error (the table keeps a count for diagnostics).
//!
//! Field access goes through [`Column`] and [`FieldLayout`]: header names are
//! matched to known columns once per table, unknown columns are ignored and
//! absent columns read as the empty string.

use crate::error::{LoadError, SchemaError};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// A column the analyses know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Age,
    Id,
    Income,
    TimeSpentHour,
    EngagementScore,
    Profession,
    Platform,
    Country,
    Indebt,
    Demographics,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Age,
        Column::Id,
        Column::Income,
        Column::TimeSpentHour,
        Column::EngagementScore,
        Column::Profession,
        Column::Platform,
        Column::Country,
        Column::Indebt,
        Column::Demographics,
    ];

    /// Lower-cased header name for this column
    pub fn header(self) -> &'static str {
        match self {
            Column::Age => "age",
            Column::Id => "id",
            Column::Income => "income",
            Column::TimeSpentHour => "time_spent_hour",
            Column::EngagementScore => "engagement_score",
            Column::Profession => "profession",
            Column::Platform => "platform",
            Column::Country => "country",
            Column::Indebt => "indebt",
            Column::Demographics => "demographics",
        }
    }

    /// Match a (already lower-cased) header name
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.header() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Raw string fields of one accepted line, index-aligned with the headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Resolved position of each known column in a header row
///
/// When a header appears more than once the first occurrence wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldLayout {
    positions: [Option<usize>; 10],
}

impl FieldLayout {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut layout = Self::default();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                let slot = &mut layout.positions[column.slot()];
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }
        layout
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column.slot()]
    }

    pub fn contains(&self, column: Column) -> bool {
        self.position(column).is_some()
    }

    /// Project a row onto the fixed record shape
    pub fn record<'a>(&self, row: &'a Row) -> UsageRecord<'a> {
        let field = |column: Column| {
            self.position(column)
                .and_then(|index| row.get(index))
                .unwrap_or("")
        };

        UsageRecord {
            age: field(Column::Age),
            id: field(Column::Id),
            income: field(Column::Income),
            time_spent_hour: field(Column::TimeSpentHour),
            engagement_score: field(Column::EngagementScore),
            profession: field(Column::Profession),
            platform: field(Column::Platform),
            country: field(Column::Country),
            indebt: field(Column::Indebt),
            demographics: field(Column::Demographics),
        }
    }
}

/// One row viewed through the known columns
///
/// Values are the raw, untrimmed strings from the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageRecord<'a> {
    pub age: &'a str,
    pub id: &'a str,
    pub income: &'a str,
    pub time_spent_hour: &'a str,
    pub engagement_score: &'a str,
    pub profession: &'a str,
    pub platform: &'a str,
    pub country: &'a str,
    pub indebt: &'a str,
    pub demographics: &'a str,
}

/// Headers plus every well-formed row of a dataset
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
    layout: FieldLayout,
    skipped_lines: usize,
}

impl Table {
    /// Parse delimited text held in memory
    pub fn parse(text: &str, delimiter: char) -> Self {
        let mut lines = text.lines();

        let header_line = match lines.next() {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => {
                // Without a header no row can match the field count
                let skipped_lines = lines.count();
                if skipped_lines > 0 {
                    debug!(skipped_lines, "header row is blank; skipped every line");
                }
                return Self {
                    skipped_lines,
                    ..Self::default()
                };
            }
            None => return Self::default(),
        };

        let headers: Vec<String> = header_line
            .trim()
            .split(delimiter)
            .map(|header| header.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        let mut skipped_lines = 0;
        for line in lines {
            let fields: Vec<String> = line.trim().split(delimiter).map(str::to_string).collect();
            if fields.len() == headers.len() {
                rows.push(Row { fields });
            } else {
                skipped_lines += 1;
            }
        }

        if skipped_lines > 0 {
            debug!(
                skipped_lines,
                expected_fields = headers.len(),
                "skipped lines with a mismatched field count"
            );
        }

        let layout = FieldLayout::from_headers(&headers);
        Self {
            headers,
            rows,
            layout,
            skipped_lines,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows (a header-only file is empty)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of lines dropped for having the wrong field count
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Rows projected onto the known columns, in file order
    pub fn records(&self) -> impl Iterator<Item = UsageRecord<'_>> + '_ {
        self.rows.iter().map(|row| self.layout.record(row))
    }

    /// Fail on the first required column the headers do not provide
    pub fn require(&self, columns: &[Column]) -> Result<(), SchemaError> {
        match columns.iter().find(|column| !self.layout.contains(**column)) {
            Some(missing) => Err(SchemaError::MissingColumn(*missing)),
            None => Ok(()),
        }
    }
}

/// Load a dataset, returning the I/O error to the caller
pub fn try_load_table<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = Table::parse(&content, delimiter);
    debug!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        skipped = table.skipped_lines(),
        "loaded table"
    );
    Ok(table)
}

/// Load a dataset, reporting an unreadable source once and returning an
/// empty table in its place
pub fn load_table<P: AsRef<Path>>(path: P, delimiter: char) -> Table {
    match try_load_table(path, delimiter) {
        Ok(table) => table,
        Err(err) => {
            warn!("{}", err);
            Table::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Age,ID,Income,Time_Spent_Hour,Engagement_Score,Profession,Platform,Country,InDebt,Demographics
20,A1,1000,5,50,student,x,US,true,d1
30,B2,2000,8,60,worker,x,US,true,d2
";

    #[test]
    fn test_headers_lowercased_and_ordered() {
        let table = Table::parse(SAMPLE, DEFAULT_DELIMITER);
        assert_eq!(
            table.headers(),
            [
                "age",
                "id",
                "income",
                "time_spent_hour",
                "engagement_score",
                "profession",
                "platform",
                "country",
                "indebt",
                "demographics"
            ]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_headers_trimmed() {
        let table = Table::parse(" Age , ID ,Income\n1,2,3\n", ',');
        assert_eq!(table.headers(), ["age", "id", "income"]);
        assert!(table.layout().contains(Column::Income));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let text = "a,b,c\n1,2,3\n1,2\n1,2,3,4\n4,5,6\n";
        let table = Table::parse(text, ',');
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines(), 2);
        assert_eq!(table.rows()[1].fields(), ["4", "5", "6"]);
    }

    #[test]
    fn test_blank_lines_skipped_for_multi_column_header() {
        let table = Table::parse("a,b\n1,2\n\n3,4\n", ',');
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = Table::parse("a,b\r\n1,2\r\n", ',');
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.rows()[0].fields(), ["1", "2"]);
    }

    #[test]
    fn test_empty_text() {
        let table = Table::parse("", ',');
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_blank_header_counts_every_line_skipped() {
        let table = Table::parse("  \n1,2\n3,4\n", ',');
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
        assert_eq!(table.skipped_lines(), 2);

        assert_eq!(Table::parse("\n", ',').skipped_lines(), 0);
    }

    #[test]
    fn test_header_only() {
        let table = Table::parse("age,id\n", ',');
        assert_eq!(table.headers().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let table = Table::parse("age;id\n20;A1\n", ';');
        assert_eq!(table.headers(), ["age", "id"]);
        assert_eq!(table.records().next().unwrap().id, "A1");
    }

    #[test]
    fn test_records_use_layout() {
        let table = Table::parse(SAMPLE, ',');
        let records: Vec<_> = table.records().collect();
        assert_eq!(records[0].age, "20");
        assert_eq!(records[0].id, "A1");
        assert_eq!(records[1].time_spent_hour, "8");
        assert_eq!(records[1].profession, "worker");
        assert_eq!(records[1].indebt, "true");
    }

    #[test]
    fn test_unknown_columns_ignored_missing_read_empty() {
        let table = Table::parse("id,favourite_colour\nA1,blue\n", ',');
        let record = table.records().next().unwrap();
        assert_eq!(record.id, "A1");
        assert_eq!(record.age, "");
        assert_eq!(record.platform, "");
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let table = Table::parse("id,id\nfirst,second\n", ',');
        assert_eq!(table.records().next().unwrap().id, "first");
    }

    #[test]
    fn test_require_reports_missing_column() {
        let table = Table::parse("age,id\n1,A\n", ',');
        assert!(table.require(&[Column::Age, Column::Id]).is_ok());
        assert_eq!(
            table.require(&[Column::Age, Column::Country]),
            Err(SchemaError::MissingColumn(Column::Country))
        );
    }

    #[test]
    fn test_column_header_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("AGE"), None);
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let table = load_table(file.path(), ',');
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers()[0], "age");
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let table = load_table("/nonexistent/engagestat/data.csv", ',');
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_try_load_reports_io_error() {
        let err = try_load_table("/nonexistent/engagestat/data.csv", ',').unwrap_err();
        assert!(err.to_string().contains("error opening file"));
    }
}
