//! Paragraph-level boilerplate removal for HTML.
//!
//! `boilercut` splits an HTML page into paragraphs and labels each one as
//! content or boilerplate (navigation, ads, legal footers, link lists)
//! using text length, stop-word density, link density, and neighbour
//! context. Classification is language-aware: a per-language stop-word
//! list tunes the "reads like natural prose" signal.
//!
//! # Quick start
//!
//! ```rust
//! use boilercut::{extract_text_lang, Config};
//!
//! let html = "<html><body><p>This is the main content.</p></body></html>";
//! let text = extract_text_lang(html, "English", &Config::default()).unwrap();
//! println!("{text}");
//! ```
//!
//! # Pipeline
//!
//! 1. clean: drop comments and `head`/`script`/`style` subtrees
//! 2. segment: cut the DOM event stream into paragraphs at block tags
//! 3. classify: context-free label from per-paragraph features
//! 4. revise: resolve `short`/`neargood` labels from neighbour context

mod classify;
mod clean;
mod decode;
mod error;
mod paragraph;
mod revise;
mod segment;
pub mod stoplists;

pub use decode::EncErrors;
pub use error::{Error, Result};
pub use paragraph::{Classification, Paragraph};
pub use stoplists::{available_languages, get_stoplist, merged_stoplist};

use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Tunables for classification and input decoding.
///
/// The classification defaults are the historical ones the algorithm was
/// evaluated with.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Paragraphs shorter than this (in characters) are too short to
    /// judge on their own.
    pub length_low: usize,
    /// Above this length, high-stopword text is `good` outright.
    pub length_high: usize,
    /// Minimum stop-word density for `neargood`.
    pub stopwords_low: f64,
    /// Minimum stop-word density for `good`.
    pub stopwords_high: f64,
    /// Paragraphs with a higher fraction of linked characters are `bad`.
    pub max_link_density: f64,
    /// Character budget when looking for body text below a heading.
    pub max_heading_distance: usize,
    /// Disable the heading promotion rules.
    pub no_headings: bool,
    /// Force this encoding for byte input instead of sniffing.
    pub encoding: Option<String>,
    /// Encoding tried last when sniffing and UTF-8 both fail.
    pub default_encoding: String,
    /// Malformed-byte policy while decoding.
    pub enc_errors: EncErrors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length_low: 70,
            length_high: 200,
            stopwords_low: 0.30,
            stopwords_high: 0.32,
            max_link_density: 0.2,
            max_heading_distance: 200,
            no_headings: false,
            encoding: None,
            default_encoding: "utf-8".to_string(),
            enc_errors: EncErrors::Replace,
        }
    }
}

impl Config {
    pub fn with_length_low(mut self, n: usize) -> Self {
        self.length_low = n;
        self
    }
    pub fn with_length_high(mut self, n: usize) -> Self {
        self.length_high = n;
        self
    }
    pub fn with_stopwords_low(mut self, v: f64) -> Self {
        self.stopwords_low = v;
        self
    }
    pub fn with_stopwords_high(mut self, v: f64) -> Self {
        self.stopwords_high = v;
        self
    }
    pub fn with_max_link_density(mut self, v: f64) -> Self {
        self.max_link_density = v;
        self
    }
    pub fn with_max_heading_distance(mut self, n: usize) -> Self {
        self.max_heading_distance = n;
        self
    }
    pub fn with_no_headings(mut self, v: bool) -> Self {
        self.no_headings = v;
        self
    }
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
    pub fn with_default_encoding(mut self, label: impl Into<String>) -> Self {
        self.default_encoding = label.into();
        self
    }
    pub fn with_enc_errors(mut self, policy: EncErrors) -> Self {
        self.enc_errors = policy;
        self
    }

    /// Reject density tunables outside `[0, 1]` before any processing.
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("stopwords_low", self.stopwords_low),
            ("stopwords_high", self.stopwords_high),
            ("max_link_density", self.max_link_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Classify the paragraphs of an HTML page.
///
/// Returns every paragraph in document order; each carries its text, its
/// measured features, the context-free class, and the final `good`/`bad`
/// class. Use [`Paragraph::is_boilerplate`] to keep only body text.
pub fn extract(html: &str, stoplist: &HashSet<String>, config: &Config) -> Result<Vec<Paragraph>> {
    config.validate()?;
    Ok(run_pipeline(html, stoplist, config))
}

/// Classify the paragraphs of an HTML page given as raw bytes.
///
/// The bytes are decoded first: a forced [`Config::encoding`] wins,
/// otherwise a `<meta charset>` declaration near the start of the buffer
/// is honoured, with UTF-8 and [`Config::default_encoding`] as fallbacks.
pub fn extract_bytes(
    html: &[u8],
    stoplist: &HashSet<String>,
    config: &Config,
) -> Result<Vec<Paragraph>> {
    config.validate()?;
    let decoded = decode::decode_html(html, config)?;
    Ok(run_pipeline(&decoded, stoplist, config))
}

fn run_pipeline(html: &str, stoplist: &HashSet<String>, config: &Config) -> Vec<Paragraph> {
    let doc = clean::clean_document(html);
    let mut paragraphs = segment::segment(&doc);
    #[cfg(feature = "tracing")]
    debug!(paragraph_count = paragraphs.len(), "segmented document");
    classify::classify_paragraphs(&mut paragraphs, stoplist, config);
    revise::revise_paragraph_classification(&mut paragraphs, config.max_heading_distance);
    #[cfg(feature = "tracing")]
    debug!(
        good_count = paragraphs.iter().filter(|p| !p.is_boilerplate()).count(),
        "revised classification"
    );
    paragraphs
}

/// Convenience: extract only the good paragraph text, newline-joined.
pub fn extract_text(html: &str, stoplist: &HashSet<String>, config: &Config) -> Result<String> {
    Ok(extract(html, stoplist, config)?
        .into_iter()
        .filter(|p| !p.is_boilerplate())
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Classify paragraphs using a bundled stop-list named by language tag.
///
/// Equivalent to [`get_stoplist`] followed by [`extract`].
pub fn extract_lang(html: &str, language: &str, config: &Config) -> Result<Vec<Paragraph>> {
    let stoplist = get_stoplist(language)?;
    extract(html, &stoplist, config)
}

/// Extract only the good paragraph text using a bundled stop-list.
///
/// Equivalent to [`get_stoplist`] followed by [`extract_text`].
pub fn extract_text_lang(html: &str, language: &str, config: &Config) -> Result<String> {
    let stoplist = get_stoplist(language)?;
    extract_text(html, &stoplist, config)
}
