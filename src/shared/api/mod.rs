pub mod codec;
pub mod response;
pub mod status_error;

pub use codec::{CodecError, JsonBody};
pub use response::ApiResponse;
pub use status_error::{ErrorKind, StatusError};
