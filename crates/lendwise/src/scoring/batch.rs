use std::fmt;
use std::io::Read;
use std::path::Path;

use super::domain::ApplicantRequest;
use crate::prediction::FormError;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// A data row (1-based, header excluded) broke a field rule.
    InvalidRow { row: usize, source: FormError },
}

impl fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read applicant file: {err}"),
            BatchImportError::Csv(err) => write!(f, "invalid applicant CSV data: {err}"),
            BatchImportError::InvalidRow { row, source } => {
                write!(f, "applicant row {row} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::InvalidRow { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads applicants from CSV whose header row uses the wire field names.
/// Every row must pass [`ApplicantRequest::validate`].
pub fn read_applicants<R: Read>(reader: R) -> Result<Vec<ApplicantRequest>, BatchImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut applicants = Vec::new();
    for (index, row) in csv_reader.deserialize::<ApplicantRequest>().enumerate() {
        let applicant = row?;
        applicant
            .validate()
            .map_err(|source| BatchImportError::InvalidRow {
                row: index + 1,
                source,
            })?;
        applicants.push(applicant);
    }

    Ok(applicants)
}

pub fn read_applicants_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ApplicantRequest>, BatchImportError> {
    let file = std::fs::File::open(path)?;
    read_applicants(file)
}
