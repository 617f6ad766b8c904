//! Error types for tender enrichment

use tenderstar_core::StreamError;

/// Transport failure while fetching one tender. Recoverable: the tender is skipped.
#[derive(Debug)]
pub struct FetchFailure {
    pub tender_id: String,
    pub cause: StreamError,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tender {}: {}", self.tender_id, self.cause)
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Response body that is not valid JSON or lacks a required field. Fatal.
#[derive(Debug)]
pub struct DecodeError {
    /// What was being decoded, e.g. `tender T1` or `contracts page 3`
    pub what: String,
    pub source: serde_json::Error,
}

impl DecodeError {
    pub fn new(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            what: what.into(),
            source,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed {}: {}", self.what, self.source)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Outcome of a failed enrichment.
#[derive(Debug)]
pub enum EnrichError {
    Fetch(FetchFailure),
    Decode(DecodeError),
}

impl std::fmt::Display for EnrichError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch failed for {e}"),
            Self::Decode(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EnrichError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Decode(e) => Some(e),
        }
    }
}

impl EnrichError {
    /// Only transport failures are skipped; shape errors abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

impl From<FetchFailure> for EnrichError {
    fn from(e: FetchFailure) -> Self {
        Self::Fetch(e)
    }
}

impl From<DecodeError> for EnrichError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_failure() -> EnrichError {
        EnrichError::Fetch(FetchFailure {
            tender_id: "T2".to_string(),
            cause: StreamError::Http {
                status: Some(404),
                message: "not found".to_string(),
            },
        })
    }

    fn decode_failure() -> EnrichError {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        EnrichError::Decode(DecodeError::new("tender T3", source))
    }

    #[test]
    fn only_fetch_is_recoverable() {
        assert!(fetch_failure().is_recoverable());
        assert!(!decode_failure().is_recoverable());
    }

    #[test]
    fn display_names_tender() {
        assert_eq!(
            fetch_failure().to_string(),
            "fetch failed for tender T2: HTTP 404: not found"
        );
        assert!(decode_failure().to_string().starts_with("malformed tender T3:"));
    }
}
