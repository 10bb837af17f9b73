pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
	#[error("Cancelled.")]
	Cancelled,
}
impl From<hail_storage::Error> for Error {
	fn from(err: hail_storage::Error) -> Self {
		match err {
			hail_storage::Error::NotFound(message) => Self::NotFound { message },
			hail_storage::Error::Cancelled => Self::Cancelled,
			other => Self::Store { message: other.to_string() },
		}
	}
}
impl From<hail_domain::Error> for Error {
	fn from(err: hail_domain::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
