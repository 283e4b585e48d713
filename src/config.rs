//! Configuration for a dataset-to-TSV conversion.
//!
//! Every knob lives in [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping them in one struct makes it trivial
//! to share a config across calls and to diff two runs when their outputs
//! differ.

use crate::error::Mcq2TsvError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a conversion run.
///
/// # Example
/// ```rust
/// use mcq2tsv::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .image_dir("data/images")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// The trusted image store. Image references resolve by basename inside
    /// this directory and nowhere else.
    pub image_dir: PathBuf,

    /// Emit the `index\timage\tquestion\tanswer` header row. Default: true.
    pub include_header: bool,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::new(),
            include_header: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("image_dir", &self.image_dir)
            .field("include_header", &self.include_header)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.image_dir = dir.into();
        self
    }

    pub fn include_header(mut self, v: bool) -> Self {
        self.config.include_header = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Mcq2TsvError> {
        if self.config.image_dir.as_os_str().is_empty() {
            return Err(Mcq2TsvError::InvalidConfig(
                "image_dir must be set (the directory holding referenced image files)".into(),
            ));
        }
        Ok(self.config)
    }
}
