//! Reference-page content source.
//!
//! # Responsibility
//! - Fetch named markup fragments that are not rendered from the store.
//! - Report "not found" and "fetch failed" as distinct, non-fatal outcomes.
//!
//! # Invariants
//! - Loaders never panic; every failure maps to a [`ReferenceError`].
//! - Names are plain page names; anything that could escape the content root
//!   is reported as not found.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;

static BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("valid body regex"));

#[derive(Debug)]
pub enum ReferenceError {
    NotFound(String),
    Fetch { name: String, message: String },
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "reference page not found: {name}"),
            Self::Fetch { name, message } => {
                write!(f, "failed to load reference page `{name}`: {message}")
            }
        }
    }
}

impl Error for ReferenceError {}

impl ReferenceError {
    /// User-visible placeholder for this failure.
    pub fn placeholder(&self) -> String {
        match self {
            Self::NotFound(name) => format!("Reference page {name} not found."),
            Self::Fetch { name, .. } => format!("Unable to load reference page {name}."),
        }
    }
}

/// Content source keyed by page name.
pub trait ReferenceLoader {
    fn load(&self, name: &str) -> Result<String, ReferenceError>;
}

/// Loads `<root>/<name>.html` and returns the inner markup of its `<body>`,
/// or the whole file when it has no body element.
#[derive(Debug, Clone)]
pub struct DirectoryReferenceLoader {
    root: PathBuf,
}

impl DirectoryReferenceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ReferenceLoader for DirectoryReferenceLoader {
    fn load(&self, name: &str) -> Result<String, ReferenceError> {
        if !is_plain_name(name) {
            warn!("event=reference_load module=reference status=rejected reason=invalid_name");
            return Err(ReferenceError::NotFound(name.to_string()));
        }

        let path = self.root.join(format!("{name}.html"));
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(
                    "event=reference_load module=reference status=ok name={name} bytes={}",
                    text.len()
                );
                Ok(extract_body(&text))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ReferenceError::NotFound(name.to_string()))
            }
            Err(err) => Err(ReferenceError::Fetch {
                name: name.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Returns the inner markup of `<body>` when present, otherwise `html`.
pub fn extract_body(html: &str) -> String {
    BODY_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
        .unwrap_or_else(|| html.to_string())
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains(['/', '\\'])
        && !name.starts_with('.')
}
