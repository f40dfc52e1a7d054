use std::fmt;

use quick_xml::de::from_str;
use reqwest;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize,
    Deserializer
};
use url::Url;

use crate::model::Paper;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
const ABS_URL_PREFIX: &str = "https://arxiv.org/abs/";
const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug)]
pub enum FetchStatus {
    Ok,
    Degraded(String)
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub status: FetchStatus,
    pub papers: Vec<Paper>
}

#[derive(Debug)]
pub struct FetchError {
    pub message: String
}

impl FetchError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string()
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::new(&format!("arXiv request failed: {}", err))
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::new(&format!("Invalid query URL: {}", err))
    }
}

#[derive(Debug, Default)]
pub struct ArxivFetcher;

impl ArxivFetcher {
    pub fn new() -> Self {
        ArxivFetcher
    }

    fn query_url(query: &str, max_results: u32) -> Result<Url, url::ParseError> {
        Url::parse_with_params(ARXIV_API_URL, &[
            ("search_query", query),
            ("start", "0"),
            ("max_results", max_results.to_string().as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ])
    }

    /// One blocking GET against the arXiv search API. Transport errors are
    /// fatal and propagate; a malformed feed degrades to an empty result
    /// set so the run can still produce a valid output file.
    pub fn fetch(&self, query: &str, max_results: u32) -> Result<FetchOutcome, FetchError> {
        let url = Self::query_url(query, max_results)?;
        println!("Fetching from: {}", url);
        let body = reqwest::blocking::get(url)?.text()?;
        Ok(Self::outcome_from_xml(&body))
    }

    fn outcome_from_xml(xml: &str) -> FetchOutcome {
        match from_str::<AtomFeed>(xml) {
            Ok(feed) => FetchOutcome {
                status: FetchStatus::Ok,
                papers: feed.entries.into_iter().map(map_entry).collect()
            },
            Err(e) => FetchOutcome {
                status: FetchStatus::Degraded(format!("failed to parse feed: {}", e)),
                papers: Vec::new()
            }
        }
    }
}

// entries keep the feed's own order (descending by submission date).
fn map_entry(entry: AtomEntry) -> Paper {
    let arxiv_id = entry.id.rsplit("/abs/").next().unwrap_or("").to_string();
    let pdf = entry.links.into_iter()
        .find(|link| link.media_type.as_deref() == Some(PDF_MEDIA_TYPE))
        .map(|link| link.href);
    Paper {
        title: entry.title.trim().to_string(),
        authors: entry.authors.into_iter().map(|a| a.name.value).collect(),
        abstract_text: entry.summary.trim().to_string(),
        pdf: pdf.clone(),
        pdf_url: pdf,
        abs_url: format!("{}{}", ABS_URL_PREFIX, arxiv_id),
        published: entry.published.split('T').next().unwrap_or("").to_string()
    }
}

// Atom Raw XML Model

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct AtomFeed {
    #[serde(rename = "entry")]
    entries: Vec<AtomEntry>
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct AtomEntry {
    id: String,
    title: String,
    summary: String,
    published: String,
    #[serde(rename = "author", flatten, deserialize_with = "de_author")]
    authors: Vec<AuthorField>,
    #[serde(rename = "link", flatten, deserialize_with = "de_link")]
    links: Vec<LinkField>
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct AuthorField {
    name: NameField
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct NameField {
    #[serde(rename = "$text")]
    value: String
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct LinkField {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@type")]
    media_type: Option<String>
}

fn de_author<'de, D>(deserializer: D) -> Result<Vec<AuthorField>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AuthorVisitor;
    impl<'de> Visitor<'de> for AuthorVisitor {
        type Value = Vec<AuthorField>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("Map of children elements - filtering for field: `author`")
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut authors = Vec::<AuthorField>::new();
            while let Some(key) = access.next_key::<String>()? {
                if key == "author" {
                    authors.push(access.next_value::<AuthorField>()?);
                }
            }
            Ok(authors)
        }
    }
    deserializer.deserialize_any(AuthorVisitor{})
}

fn de_link<'de, D>(deserializer: D) -> Result<Vec<LinkField>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LinkVisitor;
    impl<'de> Visitor<'de> for LinkVisitor {
        type Value = Vec<LinkField>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("Map of children elements - filtering for field: `link`")
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut links = Vec::<LinkField>::new();
            while let Some(key) = access.next_key::<String>()? {
                if key == "link" {
                    links.push(access.next_value::<LinkField>()?);
                }
            }
            Ok(links)
        }
    }
    deserializer.deserialize_any(LinkVisitor{})
}

// end Atom Raw XML Model
