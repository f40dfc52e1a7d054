use std::{
    env,
    io,
    path::{Path, PathBuf}
};

pub const DEFAULT_QUERY: &str = "machine learning";
pub const DEFAULT_MAX_RESULTS: u32 = 100;

#[derive(Debug)]
pub struct RunConfig {
    pub query: String,
    pub max_results: u32
}

impl RunConfig {
    pub fn new(query: String, max_results: u32) -> Self {
        RunConfig {
            query,
            max_results
        }
    }

    // first positional argument (after the program name) is the query.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let query = args.into_iter()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_QUERY.to_string());
        Self::new(query, DEFAULT_MAX_RESULTS)
    }
}

/// Fixed destination derived from the install location:
/// `<parent of the executable's directory>/arxiv/papers.json`.
pub fn default_output_path() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(output_path_for(&exe))
}

pub fn output_path_for(program: &Path) -> PathBuf {
    let bin_dir = program.parent().unwrap_or_else(|| Path::new(""));
    let install_dir = bin_dir.parent().unwrap_or_else(|| Path::new(""));
    install_dir.join("arxiv").join("papers.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_without_argument() {
        let config = RunConfig::from_args(vec![String::from("arxivfetch")]);
        assert_eq!(config.query, "machine learning");
        assert_eq!(config.max_results, 100);
    }

    #[test]
    fn test_argument_used_verbatim() {
        let config = RunConfig::from_args(vec![
            String::from("arxivfetch"),
            String::from("quantum computing")
        ]);
        assert_eq!(config.query, "quantum computing");
    }

    #[test]
    fn test_output_path_shape() {
        let path = output_path_for(Path::new("/opt/tool/bin/arxivfetch"));
        assert_eq!(path, PathBuf::from("/opt/tool/arxiv/papers.json"));
    }
}
