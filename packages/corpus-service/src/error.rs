pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<corpus_storage::Error> for Error {
	fn from(err: corpus_storage::Error) -> Self {
		match err {
			corpus_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			corpus_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			corpus_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
impl From<corpus_domain::Error> for Error {
	fn from(err: corpus_domain::Error) -> Self {
		match err {
			corpus_domain::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
