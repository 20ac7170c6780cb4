// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(ImageError),
    Output(String),
}

/// Per-image failures raised while opening an image or reading its tags.
/// These never abort a batch; the image is skipped and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// File could not be opened or is not a JPEG container
    Unreadable(String),

    /// JPEG carries no embedded EXIF segment at all
    NoMetadata,
}

impl ImageError {
    /// Returns a stable short key for this error, used in log lines and reports.
    pub fn reason_key(&self) -> &'static str {
        match self {
            ImageError::Unreadable(_) => "unreadable-image",
            ImageError::NoMetadata => "no-metadata",
        }
    }
}

impl Error {
    /// Returns whether this error aborts the whole batch.
    ///
    /// Per-image errors only skip the offending file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Image(_))
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Unreadable(msg) => write!(f, "Unreadable image: {}", msg),
            ImageError::NoMetadata => write!(f, "No embedded metadata"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Output(e) => write!(f, "Output Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Image(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Output(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
