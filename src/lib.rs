pub mod document;
pub mod error;
pub mod options;

pub use error::{DocumentError, DocumentResult};
pub use options::{JwtOptions, DEFAULT_ALGORITHM};
