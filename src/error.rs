use thiserror::Error;

/// Everything that can go wrong while producing a [`NamesDataset`].
///
/// None of these are retried: a failed load leaves the previous dataset (if
/// any) in place and the message is shown in the top bar.
///
/// [`NamesDataset`]: crate::data::model::NamesDataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("downloading {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: expected a 4-digit year at offset 3 of the file name")]
    FileName { file: String },

    #[error("{file}, line {line}: expected 3 fields, found {found}")]
    FieldCount {
        file: String,
        line: u64,
        found: usize,
    },

    #[error("{file}: {source}")]
    Row {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("archive contains no yearly .txt files")]
    Empty,
}
