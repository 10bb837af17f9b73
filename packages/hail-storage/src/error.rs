#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Unavailable: {0}")]
	Unavailable(String),
	#[error("Failed precondition: {0}")]
	FailedPrecondition(String),
	#[error("Permission denied: {0}")]
	PermissionDenied(String),
	#[error("Backend error: {0}")]
	Backend(String),
	#[error("Cancelled.")]
	Cancelled,
}
impl Error {
	/// Transient connectivity conditions worth retrying. Everything else,
	/// `NotFound` included, is terminal.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Unavailable(_) | Self::FailedPrecondition(_))
	}
}
