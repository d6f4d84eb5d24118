//! Message log file reading
//!
//! The message log is a CSV file with an `id,date,text` header. The
//! `date` column carries the day the message was received and becomes the
//! reference date for that entry's parse; a blank date falls back to the
//! day of the run.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::constants::LOG_DATE_FORMAT;
use crate::{Error, Result};

/// One raw entry of the message log
#[derive(Debug, Clone)]
pub struct MessageLogEntry {
    /// Log id of the message, used for treatment and audit bookkeeping
    pub id: i64,

    /// Day the message was received, when recorded
    pub date: Option<NaiveDate>,

    /// Raw message text
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct RawLogRecord {
    id: i64,
    date: Option<String>,
    text: String,
}

/// Read every entry of a message log file
pub fn read_message_log(path: &Path) -> Result<Vec<MessageLogEntry>> {
    let file_name = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::message_log(&file_name, "Failed to open message log", Some(e)))?;

    let mut entries = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let raw: RawLogRecord = result.map_err(|e| {
            Error::message_log(
                &file_name,
                format!("Malformed log record at row {}", row + 1),
                Some(e),
            )
        })?;

        let date = match raw.date.as_deref().filter(|s| !s.is_empty()) {
            Some(text) => Some(
                NaiveDate::parse_from_str(text, LOG_DATE_FORMAT).map_err(|e| {
                    Error::date_parsing(
                        format!("Invalid date '{}' at row {} of {}", text, row + 1, file_name),
                        e,
                    )
                })?,
            ),
            None => None,
        };

        entries.push(MessageLogEntry {
            id: raw.id,
            date,
            text: raw.text,
        });
    }

    debug!("Read {} entries from {}", entries.len(), file_name);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_well_formed_log() {
        let file = write_log(
            "id,date,text\n\
             1,2020-03-15,PRE AAAAAAAAAAAAAAAA 01.02.2020 15.03.2020 2 1 GS HO WT50.5 TO HW\n\
             2,2020-03-16,XXX foo bar\n",
        );

        let entries = read_message_log(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(
            entries[0].date,
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert!(entries[1].text.starts_with("XXX"));
    }

    #[test]
    fn test_blank_date_becomes_none() {
        let file = write_log("id,date,text\n7,,REF 0123456789012345\n");

        let entries = read_message_log(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, None);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let file = write_log("id,date,text\n7,15.03.2020,REF 0123456789012345\n");

        assert!(matches!(
            read_message_log(file.path()),
            Err(Error::DateParsing { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_message_log(Path::new("/nonexistent/messages.csv"));
        assert!(matches!(result, Err(Error::MessageLog { .. })));
    }
}
