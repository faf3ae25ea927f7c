//! Configuration types for row extraction and filtering.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`],
//! built via its [`ExtractionConfigBuilder`] or deserialized with serde.
//! Each filter is switched by a [`FilterSetting`], which accepts either a
//! plain boolean or a full options struct:
//!
//! ```json
//! { "strip_footers": true, "slice": { "vertical_slices": 512 } }
//! ```
//!
//! Numeric options are validated by [`ExtractionConfig::validate`]; values
//! out of range are rejected with [`Pdf2ArrayError::InvalidOptions`] rather
//! than clamped.

use crate::error::Pdf2ArrayError;
use serde::{Deserialize, Serialize};

/// Configuration for one extraction.
///
/// # Example
/// ```rust
/// use pdf2array::{ExtractionConfig, PageSelection};
///
/// let config = ExtractionConfig::builder()
///     .pages(PageSelection::Range(1, 3))
///     .strip_footers(true)
///     .slice(true)
///     .build()
///     .unwrap();
/// assert!(config.strip_footers.resolve().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pages to include, 1-based. Default: all pages.
    pub pages: PageSelection,

    /// Remove a footer row repeated at the bottom of most pages. Default: off.
    pub strip_footers: FilterSetting<FooterOptions>,

    /// Remove small fragments hugging a larger neighbour. Default: off.
    pub strip_superscript: FilterSetting<SuperscriptOptions>,

    /// Re-partition rows into page-wide columns. Default: off.
    pub slice: FilterSetting<SliceOptions>,

    /// PDF user password for encrypted documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check every enabled filter's options.
    pub fn validate(&self) -> Result<(), Pdf2ArrayError> {
        if let Some(opts) = self.strip_footers.resolve() {
            opts.validate()?;
        }
        if let Some(opts) = self.strip_superscript.resolve() {
            opts.validate()?;
        }
        if let Some(opts) = self.slice.resolve() {
            opts.validate()?;
        }
        if let PageSelection::Range(start, end) = self.pages {
            if start > end {
                return Err(Pdf2ArrayError::InvalidOptions(format!(
                    "page range start ({start}) is after its end ({end})"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn strip_footers(mut self, enabled: bool) -> Self {
        self.config.strip_footers = FilterSetting::Enabled(enabled);
        self
    }

    pub fn footer_options(mut self, options: FooterOptions) -> Self {
        self.config.strip_footers = FilterSetting::Options(options);
        self
    }

    pub fn strip_superscript(mut self, enabled: bool) -> Self {
        self.config.strip_superscript = FilterSetting::Enabled(enabled);
        self
    }

    pub fn superscript_options(mut self, options: SuperscriptOptions) -> Self {
        self.config.strip_superscript = FilterSetting::Options(options);
        self
    }

    pub fn slice(mut self, enabled: bool) -> Self {
        self.config.slice = FilterSetting::Enabled(enabled);
        self
    }

    pub fn slice_options(mut self, options: SliceOptions) -> Self {
        self.config.slice = FilterSetting::Options(options);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Pdf2ArrayError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Filter switches ──────────────────────────────────────────────────────

/// A filter toggle: either a plain on/off switch (defaults apply when on)
/// or an explicit options struct, which implies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSetting<T> {
    Enabled(bool),
    Options(T),
}

impl<T> Default for FilterSetting<T> {
    fn default() -> Self {
        FilterSetting::Enabled(false)
    }
}

impl<T: Clone + Default> FilterSetting<T> {
    /// The effective options, or `None` when the filter is off.
    pub fn resolve(&self) -> Option<T> {
        match self {
            FilterSetting::Enabled(false) => None,
            FilterSetting::Enabled(true) => Some(T::default()),
            FilterSetting::Options(opts) => Some(opts.clone()),
        }
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), Pdf2ArrayError> {
    if !value.is_finite() || value < 0.0 {
        return Err(Pdf2ArrayError::InvalidOptions(format!(
            "{name} must be a finite number ≥ 0, got {value}"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<(), Pdf2ArrayError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Pdf2ArrayError::InvalidOptions(format!(
            "{name} must be a finite number > 0, got {value}"
        )));
    }
    Ok(())
}

/// Options for the footer filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterOptions {
    /// Maximum baseline difference between two footer rows. Default: 1.
    pub y_tolerance: f64,
    /// Maximum difference between matching left, right or centre x. Default: 1.
    pub x_tolerance: f64,
    /// Fraction of pages that must share a footer, in `(0, 1]`. Default: 0.5.
    ///
    /// The largest cluster must *exceed* this fraction, so with the default
    /// a footer repeated on exactly half the pages is kept.
    pub confidence: f64,
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self {
            y_tolerance: 1.0,
            x_tolerance: 1.0,
            confidence: 0.5,
        }
    }
}

impl FooterOptions {
    pub fn validate(&self) -> Result<(), Pdf2ArrayError> {
        check_non_negative("footer y_tolerance", self.y_tolerance)?;
        check_non_negative("footer x_tolerance", self.x_tolerance)?;
        if !(self.confidence > 0.0 && self.confidence <= 1.0) {
            return Err(Pdf2ArrayError::InvalidOptions(format!(
                "footer confidence must be in (0, 1], got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Options for the superscript filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperscriptOptions {
    /// Search radius around a fragment's mid-left/mid-right point, as a
    /// fraction of its height. Default: 0.5.
    pub radius_scale: f64,
    /// A neighbour counts as main text when `neighbour.height * height_scale`
    /// exceeds the fragment's height. Set to 1 when superscripts use the
    /// body font size. Default: 0.75.
    pub height_scale: f64,
    /// Strip superscripts to the left of the main text. Default: true.
    pub strip_left: bool,
    /// Strip superscripts to the right of the main text. Default: true.
    pub strip_right: bool,
}

impl Default for SuperscriptOptions {
    fn default() -> Self {
        Self {
            radius_scale: 0.5,
            height_scale: 0.75,
            strip_left: true,
            strip_right: true,
        }
    }
}

impl SuperscriptOptions {
    pub fn validate(&self) -> Result<(), Pdf2ArrayError> {
        check_non_negative("superscript radius_scale", self.radius_scale)?;
        check_positive("superscript height_scale", self.height_scale)
    }
}

/// Options for the slice filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceOptions {
    /// Histogram resolution across the page width. Default: 1024.
    pub vertical_slices: usize,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            vertical_slices: 1024,
        }
    }
}

impl SliceOptions {
    /// Upper bound on `vertical_slices`; the histogram is allocated per page.
    pub const MAX_VERTICAL_SLICES: usize = 1 << 20;

    pub fn validate(&self) -> Result<(), Pdf2ArrayError> {
        if !(1..=Self::MAX_VERTICAL_SLICES).contains(&self.vertical_slices) {
            return Err(Pdf2ArrayError::InvalidOptions(format!(
                "slice vertical_slices must be in 1..={}, got {}",
                Self::MAX_VERTICAL_SLICES,
                self.vertical_slices
            )));
        }
        Ok(())
    }
}

// ── Page selection ───────────────────────────────────────────────────────

/// Specifies which pages of the PDF to read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Read all pages (default).
    #[default]
    All,
    /// Read a single page (1-indexed).
    Single(usize),
    /// Read a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Read specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

impl From<Vec<usize>> for PageSelection {
    fn from(pages: Vec<usize>) -> Self {
        PageSelection::Set(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_all_filters_off() {
        let config = ExtractionConfig::default();
        assert_eq!(config.pages, PageSelection::All);
        assert!(config.strip_footers.resolve().is_none());
        assert!(config.strip_superscript.resolve().is_none());
        assert!(config.slice.resolve().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn enabled_switch_resolves_to_defaults() {
        let setting: FilterSetting<FooterOptions> = FilterSetting::Enabled(true);
        assert_eq!(setting.resolve(), Some(FooterOptions::default()));
    }

    #[test]
    fn builder_rejects_negative_tolerance() {
        let err = ExtractionConfig::builder()
            .footer_options(FooterOptions {
                x_tolerance: -1.0,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2ArrayError::InvalidOptions(_)));
        assert!(err.to_string().contains("x_tolerance"));
    }

    #[test]
    fn builder_rejects_confidence_out_of_range() {
        for confidence in [0.0, 1.5, f64::NAN] {
            let result = ExtractionConfig::builder()
                .footer_options(FooterOptions {
                    confidence,
                    ..Default::default()
                })
                .build();
            assert!(result.is_err(), "confidence {confidence} should be rejected");
        }
        let ok = ExtractionConfig::builder()
            .footer_options(FooterOptions {
                confidence: 1.0,
                ..Default::default()
            })
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn builder_rejects_zero_height_scale_and_slices() {
        assert!(ExtractionConfig::builder()
            .superscript_options(SuperscriptOptions {
                height_scale: 0.0,
                ..Default::default()
            })
            .build()
            .is_err());
        assert!(ExtractionConfig::builder()
            .slice_options(SliceOptions { vertical_slices: 0 })
            .build()
            .is_err());
    }

    #[test]
    fn builder_rejects_oversized_slice_resolution() {
        for vertical_slices in [SliceOptions::MAX_VERTICAL_SLICES + 1, usize::MAX] {
            let err = ExtractionConfig::builder()
                .slice_options(SliceOptions { vertical_slices })
                .build()
                .unwrap_err();
            assert!(matches!(err, Pdf2ArrayError::InvalidOptions(_)));
            assert!(err.to_string().contains("vertical_slices"));
        }
        assert!(ExtractionConfig::builder()
            .slice_options(SliceOptions {
                vertical_slices: SliceOptions::MAX_VERTICAL_SLICES,
            })
            .build()
            .is_ok());
    }

    #[test]
    fn disabled_filters_are_not_validated() {
        let config = ExtractionConfig {
            strip_footers: FilterSetting::Enabled(false),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_page_range_is_rejected() {
        assert!(ExtractionConfig::builder()
            .pages(PageSelection::Range(5, 2))
            .build()
            .is_err());
    }

    #[test]
    fn page_selection_to_indices() {
        assert_eq!(PageSelection::All.to_indices(3), vec![0, 1, 2]);
        assert_eq!(PageSelection::Single(2).to_indices(3), vec![1]);
        assert_eq!(PageSelection::Single(0).to_indices(3), Vec::<usize>::new());
        assert_eq!(PageSelection::Range(2, 10).to_indices(4), vec![1, 2, 3]);
        assert_eq!(PageSelection::Set(vec![3, 1, 3, 9]).to_indices(4), vec![0, 2]);
    }
}
