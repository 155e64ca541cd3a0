use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("FileError: {0}")]
    File(#[from] FileError),
    #[error("ImageError: {0}")]
    Image(#[from] ImageError),
    #[error("PdfError: {0}")]
    Pdf(#[from] PdfError),
    #[error("NetworkError: {0}")]
    Network(#[from] NetworkError),
    #[error("DataError: {0}")]
    Data(#[from] DataError),
    #[error("DateTimeError: {0}")]
    DateTime(#[from] DateTimeError),
    #[error("CommandError: {0}")]
    Command(#[from] CommandError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("ValidationError: {0}")]
    Validation(String),
}

impl AppError {
    /// True when the failure is caused by an absent external tool rather
    /// than by the input or the environment at runtime.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, AppError::Pdf(PdfError::RasterizerMissing { .. }))
    }
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("Path not found: {path}")]
    NotFound { path: String },
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },
    #[error("Unsupported archive format '{format}' (use 'zip' or 'tar.gz')")]
    UnsupportedFormat { format: String },
    #[error("Unrecognized archive extension: {path}")]
    UnknownExtension { path: String },
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Quality must be between 1 and 100, got {quality}")]
    InvalidQuality { quality: u8 },
    #[error("Cannot infer image format for {path}")]
    UnknownFormat { path: String },
    #[error("DPI metadata is only supported for PNG output, not {format}")]
    DpiUnsupported { format: String },
    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("No readable input documents")]
    NoInputs,
    #[error("Document has no pages")]
    NoPages,
    #[error("Rasterizer 'pdftoppm' not found; install poppler-utils")]
    RasterizerMissing,
    #[error("Rasterizer failed: {detail}")]
    RasterizerFailed { detail: String },
    #[error("Unsupported image format '{format}' (use 'png' or 'jpeg')")]
    UnsupportedImageFormat { format: String },
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No records to write")]
    EmptyInput,
    #[error("JSON root must be an array of flat objects")]
    NotAnArray,
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum DateTimeError {
    #[error("Invalid date/time format pattern: {pattern}")]
    InvalidFormat { pattern: String },
    #[error("Could not parse '{value}': {source}")]
    Parse {
        value: String,
        source: chrono::ParseError,
    },
    #[error("Date arithmetic out of range")]
    OutOfRange,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Category '{name}' not found. Available categories: {}", available.join(", "))]
    UnknownCategory {
        name: String,
        available: Vec<String>,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed config file: {0}")]
    Malformed(String),
    #[error("Could not determine the user config directory")]
    NoConfigDir,
}
