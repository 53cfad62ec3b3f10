use thiserror::Error;

/// Recoverable input-loading failures. The caller reports these and leaves
/// the dataset unset; nothing here aborts the process.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse tab-separated data: {0}")]
    Tsv(#[from] csv::Error),

    #[error("input has no header row")]
    EmptyInput,

    #[error("sheet '{wanted}' not found; available sheets: {}", .available.join(", "))]
    MissingSheet { wanted: String, available: Vec<String> },

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("output path must not be empty")]
    EmptyOutPath,
}
