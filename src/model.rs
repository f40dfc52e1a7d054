use chrono::Local;
use serde::{Deserialize, Serialize};

// used for both the in-memory search hits and the JSON document on disk.

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Paper {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    // both carry the same value; the duplicate name is kept for
    // backward compatibility with earlier consumers of the file.
    pub pdf: Option<String>,
    pub pdf_url: Option<String>,
    pub abs_url: String,
    pub published: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub updated_at: String,
    pub papers: Vec<Paper>,
}

impl SearchResults {
    pub fn new(query: &str, papers: Vec<Paper>) -> Self {
        SearchResults {
            query: query.to_string(),
            updated_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            papers,
        }
    }
}
