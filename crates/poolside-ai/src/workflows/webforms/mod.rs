//! Importer for legacy webform CSV exports.
//!
//! Before the onboarding wizard shipped, leads arrived through a generic
//! webform whose exports still get replayed into the pipeline. The importer
//! parses those exports, maps each row onto a [`LeadSubmission`], and keeps
//! the original submission time so queue ordering stays honest.

mod mapping;
mod parser;

use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;

use crate::workflows::onboarding::leads::domain::LeadSubmission;

/// One export row, ready to feed the lead service.
#[derive(Debug, Clone, PartialEq)]
pub struct WebformLead {
    pub submission: LeadSubmission,
    /// Original submission time when the export carried a parseable one.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Outcome of importing an export file.
#[derive(Debug, Clone, PartialEq)]
pub struct WebformImport {
    pub leads: Vec<WebformLead>,
    /// Rows dropped because they carried no contact identity.
    pub skipped: usize,
}

#[derive(Debug)]
pub enum WebformImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for WebformImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebformImportError::Io(err) => write!(f, "failed to read webform export: {}", err),
            WebformImportError::Csv(err) => write!(f, "invalid webform CSV data: {}", err),
        }
    }
}

impl std::error::Error for WebformImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebformImportError::Io(err) => Some(err),
            WebformImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WebformImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for WebformImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct WebformLeadImporter;

impl WebformLeadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WebformImport, WebformImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<WebformImport, WebformImportError> {
        let mut leads = Vec::new();
        let mut skipped = 0usize;

        for row in parser::parse_rows(reader)? {
            match mapping::lead_from_row(row) {
                Some(lead) => leads.push(lead),
                None => skipped += 1,
            }
        }

        Ok(WebformImport { leads, skipped })
    }
}
