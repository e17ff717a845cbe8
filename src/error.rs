use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintCostError {
    #[error("No file was provided")]
    EmptyInputError,

    #[error("Unsupported format: {0}")]
    UnsupportedFormatError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PrintCostError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PrintCostError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create an unsupported format error.
    unsupported_format => UnsupportedFormatError,
    /// Create a page decode error.
    decode => DecodeError,
    /// Create a configuration error.
    config => ConfigError,
    /// Create a render error.
    render => RenderError,
}

impl PrintCostError {
    /// Whether the error was caused by the uploaded input rather than by the
    /// service itself. Client errors map to HTTP 400, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInputError | Self::UnsupportedFormatError(_))
    }
}

impl From<serde_yml::Error> for PrintCostError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for PrintCostError {
    fn from(e: image::ImageError) -> Self {
        Self::DecodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrintCostError>;
