mod error;

pub use error::{ClientError, ConsoleError, FormError};
