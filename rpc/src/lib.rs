//! Shared error type of the Encointer RPC extensions.

mod error;

pub use error::Error;
