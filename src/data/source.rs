use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::Url;

use super::error::LoadError;

/// The Kaggle export the dashboard was built around.
pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/Raf888-sr/DDDM/main/nobel.csv";

// ---------------------------------------------------------------------------
// DataFormat
// ---------------------------------------------------------------------------

/// Tabular encodings the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Header row plus one award per line.
    Csv,
    /// Records-oriented array: `[{ "year": 1901, "category": "Physics", ... }, ...]`.
    Json,
    Parquet,
}

impl DataFormat {
    /// Dispatch by file extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Err(LoadError::NoExtension(path.display().to_string()));
        };

        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            "parquet" | "pq" => Ok(DataFormat::Parquet),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataFormat::Csv => "CSV",
            DataFormat::Json => "JSON",
            DataFormat::Parquet => "Parquet",
        })
    }
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Where the raw dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` URIs are fetched over the network, anything else is a local path.
    pub fn parse(uri: &str) -> Result<Self, LoadError> {
        let uri = uri.trim();
        if uri.starts_with("http://") || uri.starts_with("https://") {
            let url = Url::parse(uri).map_err(|e| LoadError::InvalidUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;
            Ok(DataSource::Remote(url))
        } else {
            Ok(DataSource::File(PathBuf::from(uri)))
        }
    }

    pub fn format(&self) -> Result<DataFormat, LoadError> {
        match self {
            DataSource::Remote(url) => {
                DataFormat::from_path(Path::new(url.path())).map_err(|e| match e {
                    LoadError::NoExtension(_) => LoadError::NoExtension(url.to_string()),
                    other => other,
                })
            }
            DataSource::File(path) => DataFormat::from_path(path),
        }
    }

    /// Read the raw bytes. Blocks until the transfer completes.
    pub fn fetch(&self) -> Result<Bytes, LoadError> {
        match self {
            DataSource::Remote(url) => {
                log::info!("Fetching dataset from {url}");
                let fetch_err = |source| LoadError::Fetch {
                    uri: url.to_string(),
                    source,
                };
                reqwest::blocking::get(url.clone())
                    .and_then(|resp| resp.error_for_status())
                    .and_then(|resp| resp.bytes())
                    .map_err(fetch_err)
            }
            DataSource::File(path) => {
                log::info!("Reading dataset from {}", path.display());
                std::fs::read(path)
                    .map(Bytes::from)
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_remote_and_local() {
        assert!(matches!(DataSource::parse(DEFAULT_SOURCE), Ok(DataSource::Remote(_))));
        assert_eq!(
            DataSource::parse("data/nobel.csv").unwrap(),
            DataSource::File(PathBuf::from("data/nobel.csv"))
        );
    }

    #[test]
    fn format_follows_extension() {
        let remote = DataSource::parse("https://example.org/awards.parquet?raw=1").unwrap();
        assert_eq!(remote.format().unwrap(), DataFormat::Parquet);
        assert_eq!(DataSource::parse("a.JSON").unwrap().format().unwrap(), DataFormat::Json);
        assert!(matches!(
            DataSource::parse("a.xlsx").unwrap().format(),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn bad_urls_and_missing_extensions_are_named() {
        let err = DataSource::parse("https://exa mple.org/nobel.csv").unwrap_err();
        assert!(matches!(&err, LoadError::InvalidUri { uri, .. } if uri == "https://exa mple.org/nobel.csv"));
        assert!(err.to_string().starts_with("invalid URL https://exa mple.org/nobel.csv"));

        let remote = DataSource::parse("https://example.org/laureates").unwrap();
        assert!(matches!(
            remote.format(),
            Err(LoadError::NoExtension(uri)) if uri == "https://example.org/laureates"
        ));
        assert!(matches!(
            DataSource::parse("nobel").unwrap().format(),
            Err(LoadError::NoExtension(path)) if path == "nobel"
        ));
    }

    #[test]
    fn unreachable_host_is_a_fetch_error() {
        // Port 9 (discard) on loopback refuses the connection without any network access.
        let src = DataSource::parse("http://127.0.0.1:9/nobel.csv").unwrap();
        assert!(matches!(
            src.fetch(),
            Err(LoadError::Fetch { uri, .. }) if uri == "http://127.0.0.1:9/nobel.csv"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let src = DataSource::File(std::env::temp_dir().join("nobel-explorer-does-not-exist.csv"));
        assert!(matches!(src.fetch(), Err(LoadError::Io { .. })));
    }
}
