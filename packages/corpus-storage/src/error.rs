#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
}
impl From<corpus_domain::Error> for Error {
	fn from(err: corpus_domain::Error) -> Self {
		match err {
			corpus_domain::Error::InvalidArgument(message) => Self::InvalidArgument(message),
		}
	}
}
