//! Collection types used in multi-document (persona) mode.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// A document listed in a collection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name relative to the document directory
    pub filename: String,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocumentRef {
    /// Create a reference to a file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: None,
        }
    }
}

/// The persona the sections are ranked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// The task the persona wants to accomplish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// Input descriptor for multi-document mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRequest {
    /// Target documents, in ranking order
    pub documents: Vec<DocumentRef>,

    /// Persona
    pub persona: Persona,

    /// Job to be done
    pub job_to_be_done: JobToBeDone,
}

impl CollectionRequest {
    /// Create a request.
    pub fn new(
        documents: Vec<DocumentRef>,
        role: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            documents,
            persona: Persona { role: role.into() },
            job_to_be_done: JobToBeDone { task: task.into() },
        }
    }

    /// Parse a request from JSON. Unknown fields are ignored.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Read and parse a request file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// File names of every requested document.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

/// A ranked section selected from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCandidate {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// Excerpt extracted below a selected section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 local time
    pub processing_timestamp: String,
}

/// Output of multi-document mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub metadata: CollectionMetadata,
    pub extracted_sections: Vec<SectionCandidate>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
