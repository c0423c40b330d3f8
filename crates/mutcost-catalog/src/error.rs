//! Error types for the mutation catalog
//!
//! Provides error handling for:
//! - Load operations (Mutations.xml → `Catalog`)
//! - Write operations (`Catalog` → Mutations.xml)

use std::path::PathBuf;

/// Errors while loading the baseline dataset
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Baseline file could not be opened or read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Document is not well-formed XML
    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Attribute list could not be parsed
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A required attribute is absent or empty
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element lacking the attribute
        element: &'static str,
        /// Attribute that was expected
        attribute: &'static str,
    },

    /// The `<mutations>` root element was never found
    #[error("no <mutations> root element")]
    MissingRoot,

    /// Document ended inside an open element
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(&'static str),
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create missing attribute error
    #[must_use]
    pub fn missing_attribute(element: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute { element, attribute }
    }
}

/// Errors while writing the generated dataset
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Destination could not be created or written
    #[error("io error writing {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Sink failed mid-document
    #[error("sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// XML writer failed
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl WriteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attribute_display() {
        let err = LoadError::missing_attribute("category", "Name");
        assert_eq!(
            err.to_string(),
            "<category> is missing required attribute 'Name'"
        );
    }

    #[test]
    fn io_error_keeps_path() {
        let err = LoadError::io_error(
            "data/Mutations.xml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("data/Mutations.xml"));
    }

    #[test]
    fn sink_failure_converts() {
        let sink = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = WriteError::from(sink);
        assert!(matches!(err, WriteError::Sink(_)));
        assert_eq!(err.to_string(), "sink error: closed");
    }
}
