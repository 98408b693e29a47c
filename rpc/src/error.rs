use jsonrpsee::types::{error::ErrorObject, ErrorObjectOwned};

mod error_codes {
	pub const RUNTIME_ERROR: i32 = 1; // Arbitrary number, but substrate uses the same
	pub const UNKNOWN_ERROR: i32 = 100;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Error while calling into the runtime: {0}")]
	Runtime(Box<dyn std::error::Error + Send + Sync>),
	#[error("Other error: {0}")]
	Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
	fn code(&self) -> i32 {
		use Error::*;
		match self {
			Runtime(_) => error_codes::RUNTIME_ERROR,
			Other(_) => error_codes::UNKNOWN_ERROR,
		}
	}
}

impl From<Error> for ErrorObjectOwned {
	fn from(err: Error) -> Self {
		ErrorObject::owned(err.code(), err.to_string(), None::<()>)
	}
}
