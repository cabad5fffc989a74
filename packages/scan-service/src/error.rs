pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Provider timed out: {message}")]
	Timeout { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<scan_providers::Error> for Error {
	fn from(err: scan_providers::Error) -> Self {
		if err.is_timeout() {
			return Self::Timeout { message: err.to_string() };
		}

		Self::Provider { message: err.to_string() }
	}
}

impl From<scan_storage::Error> for Error {
	fn from(err: scan_storage::Error) -> Self {
		match err {
			scan_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			scan_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
