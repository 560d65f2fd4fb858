//! CSV loading and saving for the tweet partitions
//!
//! The train partition carries `id,keyword,location,text,target`; the test
//! partition carries the same columns without `target`. Headers are
//! validated up front and malformed rows are rejected with a diagnostic
//! naming the offending line, never dropped silently.

use super::types::{Prediction, TweetRecord};
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing the tabular files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("row {id}: missing target label in training partition")]
    MissingTarget { id: i64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Loader for the tweet CSV partitions.
pub struct DataLoader;

impl DataLoader {
    /// Load the training partition. Every row must carry a target label.
    pub fn load_train<P: AsRef<Path>>(path: P) -> Result<Vec<TweetRecord>, DataError> {
        let records = Self::load(path, true)?;
        for record in &records {
            if record.target.is_none() {
                return Err(DataError::MissingTarget { id: record.id });
            }
        }
        Ok(records)
    }

    /// Load the test partition. The `target` column is not required.
    pub fn load_test<P: AsRef<Path>>(path: P) -> Result<Vec<TweetRecord>, DataError> {
        Self::load(path, false)
    }

    fn load<P: AsRef<Path>>(path: P, require_target: bool) -> Result<Vec<TweetRecord>, DataError> {
        let file = File::open(path.as_ref())?;
        let mut reader = csv::Reader::from_reader(file);

        Self::check_headers(&mut reader, require_target)?;

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: TweetRecord = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                DataError::MalformedRow { line, source: e }
            })?;
            records.push(record);
        }

        debug!(rows = records.len(), path = %path.as_ref().display(), "loaded partition");
        Ok(records)
    }

    fn check_headers(
        reader: &mut csv::Reader<File>,
        require_target: bool,
    ) -> Result<(), DataError> {
        let headers = reader.headers()?.clone();
        let mut required: Vec<&'static str> = vec!["id", "text"];
        if require_target {
            required.push("target");
        }

        for name in required {
            if !headers.iter().any(|h| h == name) {
                return Err(DataError::MissingColumn(name));
            }
        }
        Ok(())
    }

    /// Write one `id,target` prediction file.
    pub fn write_predictions<P: AsRef<Path>>(
        path: P,
        predictions: &[Prediction],
    ) -> Result<(), DataError> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for prediction in predictions {
            writer.serialize(prediction)?;
        }
        writer.flush()?;
        debug!(rows = predictions.len(), path = %path.as_ref().display(), "wrote predictions");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("disaster_tweets_{}_{}", std::process::id(), name))
    }

    fn write_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = temp_path(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_train() {
        let path = write_file(
            "train_ok.csv",
            "id,keyword,location,text,target\n\
             1,,,Forest fire near La Ronge,1\n\
             2,storm,Canada,All residents asked to shelter in place,1\n\
             3,,,I love fruits,0\n",
        );

        let records = DataLoader::load_train(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].target, Some(1));
        assert_eq!(records[1].keyword.as_deref(), Some("storm"));
        assert!(records[0].keyword.is_none());
    }

    #[test]
    fn test_missing_column_rejected() {
        let path = write_file("train_nocol.csv", "id,keyword,location,text\n1,,,hello\n");

        let err = DataLoader::load_train(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("target")));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let path = write_file(
            "train_bad.csv",
            "id,keyword,location,text,target\n\
             1,,,ok tweet,1\n\
             not_an_id,,,broken tweet,0\n",
        );

        let err = DataLoader::load_train(&path).unwrap_err();
        match err {
            DataError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_predictions_roundtrip() {
        let path = temp_path("preds.csv");
        let predictions = vec![
            Prediction { id: 10, target: 1 },
            Prediction { id: 11, target: 0 },
        ];

        DataLoader::write_predictions(&path, &predictions).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,target"));
        assert!(content.contains("10,1"));
        assert!(content.contains("11,0"));
    }
}
