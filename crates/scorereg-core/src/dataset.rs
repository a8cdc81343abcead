use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// class_score_en.csv: midterm (max 125), final (max 100), CRLF line endings.
const EMBEDDED_CSV_B64: &str = "IyBtaWR0ZXJtIChtYXggMTI1KSwgZmluYWwgKG1heCAxMDApDQoxMTMsIDg2DQoxMDQsIDgzDQoxMTAsIDc4DQoxMDEsIDc5DQoxMDEsIDc3DQoxMDMsIDc2DQo3MSwgOTQNCjEwMiwgNzENCjg4LCA3Ng0KMTAxLCA3Mg0KODEsIDc4DQo4NCwgNzgNCjkxLCA3Mg0KMTA3LCA2NQ0KNjQsIDg5DQo3OCwgODYNCjc0LCA3Mw0KMTE3LCA0NQ0KMTAwLCA1NQ0KMTA1LCA1Mw0KNzIsIDg4DQo4NywgNzMNCjQ0LCA3Mw0KNjYsIDgxDQo2NCwgNzANCjg2LCA1MQ0KNjgsIDUyDQo0NywgNjYNCjYzLCA2Ng0KNTEsIDU3DQo2NCwgNDENCjU0LCA0OQ0KNTMsIDQ3DQo5MiwgMjkNCjQ4LCAxOA0KNDIsIDM2DQoyMSwgMjINCjU1LCA1NQ0KNjEsIDI4DQo1MCwgMzUNCjIxLCAwDQo0NSwgMA0KNDIsIDA=";

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("malformed input: embedded data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed input: data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed input: missing header line")]
    MissingHeader,
    #[error("malformed input: line {line}: expected 2 columns, found {found}")]
    WrongColumnCount { line: u64, found: usize },
    #[error("malformed input: line {line}: '{value}' is not a number")]
    NotNumeric { line: u64, value: String },
    #[error("malformed input: line {line}: '{value}' is not a finite number")]
    NonFinite { line: u64, value: String },
    #[error("malformed input: row {row} holds a non-finite value ({predictor}, {target})")]
    NonFiniteSample { row: usize, predictor: f64, target: f64 },
    #[error("malformed input: header present but no data rows")]
    NoRows,
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Everything except a failed read is a malformed-input condition.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DatasetError::Io(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub predictor: f64,
    pub target: f64,
}

impl Sample {
    pub fn new(predictor: f64, target: f64) -> Self {
        Self { predictor, target }
    }

    pub fn is_finite(&self) -> bool {
        self.predictor.is_finite() && self.target.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub predictor_name: String,
    pub target_name: String,
    samples: Vec<Sample>,
}

impl Dataset {
    /// Build a dataset from rows already in memory. Rows must be finite and non-empty.
    pub fn new(
        predictor_name: &str,
        target_name: &str,
        samples: Vec<Sample>,
    ) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::NoRows);
        }
        if let Some((row, s)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(DatasetError::NonFiniteSample {
                row,
                predictor: s.predictor,
                target: s.target,
            });
        }
        Ok(Self {
            predictor_name: predictor_name.to_string(),
            target_name: target_name.to_string(),
            samples,
        })
    }

    /// Decode the bundled exam score table.
    pub fn embedded() -> Result<Self, DatasetError> {
        let bytes = STANDARD.decode(EMBEDDED_CSV_B64)?;
        let text = String::from_utf8(bytes)?;
        Self::from_csv_str(&text)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        tracing::debug!("reading dataset from {}", path.as_ref().display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, DatasetError> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse a two column CSV: one header record followed by numeric rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        if header.is_empty() {
            return Err(DatasetError::MissingHeader);
        }
        if header.len() != 2 {
            return Err(DatasetError::WrongColumnCount { line: 1, found: header.len() });
        }
        let predictor_name = clean_column_name(&header[0]);
        let target_name = clean_column_name(&header[1]);

        let mut samples = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != 2 {
                return Err(DatasetError::WrongColumnCount { line, found: record.len() });
            }
            let predictor = parse_value(&record[0], line)?;
            let target = parse_value(&record[1], line)?;
            samples.push(Sample { predictor, target });
        }

        if samples.is_empty() {
            return Err(DatasetError::NoRows);
        }

        tracing::debug!(
            "parsed {} rows ({}, {})",
            samples.len(),
            predictor_name,
            target_name
        );
        Ok(Self { predictor_name, target_name, samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.samples.len(), 2)
    }

    pub fn column_names(&self) -> [&str; 2] {
        [&self.predictor_name, &self.target_name]
    }

    pub fn head(&self, n: usize) -> &[Sample] {
        &self.samples[..n.min(self.samples.len())]
    }

    pub fn predictors(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.predictor).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.target).collect()
    }
}

fn parse_value(raw: &str, line: u64) -> Result<f64, DatasetError> {
    let field = raw.trim();
    let value: f64 = field
        .parse()
        .map_err(|_| DatasetError::NotNumeric { line, value: field.to_string() })?;
    if !value.is_finite() {
        return Err(DatasetError::NonFinite { line, value: field.to_string() });
    }
    Ok(value)
}

// "# midterm (max 125)" -> "midterm"
pub fn clean_column_name(raw: &str) -> String {
    let head = raw.split('(').next().unwrap_or(raw);
    head.replace('#', "").trim().replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_shape() {
        let data = Dataset::embedded().unwrap();
        assert_eq!(data.shape(), (43, 2));
        assert_eq!(data.column_names(), ["midterm", "final"]);
    }

    #[test]
    fn test_embedded_first_and_last_rows() {
        let data = Dataset::embedded().unwrap();
        assert_eq!(data.samples()[0], Sample::new(113., 86.));
        assert_eq!(data.samples()[1], Sample::new(104., 83.));
        assert_eq!(*data.samples().last().unwrap(), Sample::new(42., 0.));
    }

    #[test]
    fn test_clean_column_name() {
        assert_eq!(clean_column_name("# midterm (max 125)"), "midterm");
        assert_eq!(clean_column_name(" final (max 100)"), "final");
        assert_eq!(clean_column_name("Exam Score"), "exam_score");
    }

    #[test]
    fn test_plain_csv() {
        let data = Dataset::from_csv_str("x,y\n1,2\n3,4.5\n\n5,6\n").unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.predictors(), vec![1., 3., 5.]);
        assert_eq!(data.targets(), vec![2., 4.5, 6.]);
    }

    #[test]
    fn test_not_numeric() {
        let err = Dataset::from_csv_str("x,y\n1,2\n3,abc\n").unwrap_err();
        match err {
            DatasetError::NotNumeric { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_column() {
        let err = Dataset::from_csv_str("x,y\n1,2,3\n").unwrap_err();
        assert!(matches!(err, DatasetError::WrongColumnCount { line: 2, found: 3 }));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_missing_column_in_header() {
        let err = Dataset::from_csv_str("x\n1\n").unwrap_err();
        assert!(matches!(err, DatasetError::WrongColumnCount { line: 1, found: 1 }));
    }

    #[test]
    fn test_nan_rejected() {
        let err = Dataset::from_csv_str("x,y\nNaN,2\n").unwrap_err();
        assert!(matches!(err, DatasetError::NonFinite { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(Dataset::from_csv_str("").unwrap_err(), DatasetError::MissingHeader));
        assert!(matches!(Dataset::from_csv_str("x,y\n").unwrap_err(), DatasetError::NoRows));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let samples = vec![Sample::new(1., 2.), Sample::new(2., f64::NAN), Sample::new(3., 4.)];
        let err = Dataset::new("x", "y", samples).unwrap_err();
        assert!(matches!(err, DatasetError::NonFiniteSample { row: 1, .. }));
        assert!(err.is_malformed());

        let samples = vec![Sample::new(f64::INFINITY, 2.)];
        assert!(Dataset::new("x", "y", samples).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(Dataset::new("x", "y", Vec::new()), Err(DatasetError::NoRows)));
    }

    #[test]
    fn test_new_keeps_rows() {
        let data = Dataset::new("x", "y", vec![Sample::new(1., 2.), Sample::new(3., 4.)]).unwrap();
        assert_eq!(data.shape(), (2, 2));
        assert_eq!(data.column_names(), ["x", "y"]);
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_path("definitely/not/here.csv").unwrap_err();
        assert!(!err.is_malformed());
    }
}
