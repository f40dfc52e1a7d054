use std::{
    fs::{self, File},
    io,
    path::Path
};

use crate::model::{Paper, SearchResults};

// Utils to store the search results document on local device.
pub struct JsonSaver;

impl JsonSaver {
    /// Wraps the papers in the result envelope, stamps it with the current
    /// local time and writes it as pretty JSON, replacing prior content.
    /// Missing parent directories are created first.
    pub fn save_papers_json(path: &Path, papers: Vec<Paper>, query: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let results = SearchResults::new(query, papers);
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &results)?;
        println!("Saved {} papers to {}", results.papers.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    fn sample_papers() -> Vec<Paper> {
        vec![
            Paper {
                title: String::from("Quantum Widgets"),
                authors: vec![String::from("Alice Example")],
                abstract_text: String::from("First abstract."),
                pdf: Some(String::from("http://arxiv.org/pdf/2401.00001v1")),
                pdf_url: Some(String::from("http://arxiv.org/pdf/2401.00001v1")),
                abs_url: String::from("https://arxiv.org/abs/2401.00001v1"),
                published: String::from("2024-01-02")
            },
            Paper {
                title: String::from("No PDF Here"),
                authors: Vec::new(),
                abstract_text: String::from("Second abstract."),
                pdf: None,
                pdf_url: None,
                abs_url: String::from("https://arxiv.org/abs/2401.00002v3"),
                published: String::from("2024-01-01")
            }
        ]
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arxiv").join("papers.json");
        let papers = sample_papers();
        JsonSaver::save_papers_json(&path, papers.clone(), "quantum computing").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let results: SearchResults = serde_json::from_str(&text).unwrap();
        assert_eq!(results.query, "quantum computing");
        assert!(!results.updated_at.is_empty());
        assert_eq!(results.papers, papers);
    }

    #[test]
    fn test_envelope_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("papers.json");
        JsonSaver::save_papers_json(&path, sample_papers(), "machine learning").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value.get("query").is_some());
        assert!(value.get("updated_at").is_some());
        assert_eq!(value["papers"].as_array().unwrap().len(), 2);
        // absent PDF links are written as explicit nulls, not dropped.
        assert!(value["papers"][1]["pdf"].is_null());
        assert!(value["papers"][1]["pdf_url"].is_null());
    }

    #[test]
    fn test_directory_creation_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("arxiv").join("papers.json");
        JsonSaver::save_papers_json(&path, sample_papers(), "first run").unwrap();
        JsonSaver::save_papers_json(&path, sample_papers(), "second run").unwrap();
    }

    #[test]
    fn test_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("papers.json");
        JsonSaver::save_papers_json(&path, sample_papers(), "full").unwrap();
        JsonSaver::save_papers_json(&path, Vec::new(), "empty").unwrap();

        let results: SearchResults =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(results.query, "empty");
        assert!(results.papers.is_empty());
    }
}
