use std::fmt;

/// Failure reported by an I/O collaborator, reduced to what the state machine needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFailure {
    /// HTTP status when the failure came from a remote response.
    pub status: Option<u16>,
    pub timed_out: bool,
    pub detail: String,
}

impl SourceFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    LoadFailure,
    SearchFailure,
    FavoriteToggleFailure,
}

impl StoreErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            StoreErrorKind::LoadFailure => "failed to load recipes",
            StoreErrorKind::SearchFailure => "search failed",
            StoreErrorKind::FavoriteToggleFailure => "failed to toggle favorite",
        }
    }
}

/// Error surfaced to presentation through the `error` field of the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub timed_out: bool,
}

impl StoreError {
    pub(crate) fn from_failure(kind: StoreErrorKind, failure: &SourceFailure) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            status: failure.status,
            timed_out: failure.timed_out,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.timed_out) {
            (_, true) => write!(f, "{} (timed out)", self.message),
            (Some(status), false) => write!(f, "{} (http status {status})", self.message),
            (None, false) => write!(f, "{}", self.message),
        }
    }
}
