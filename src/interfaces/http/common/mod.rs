//! Shared HTTP building blocks

mod api_error;
mod api_response;
mod current_user;
mod validated_json;

pub use api_error::ApiError;
pub use api_response::ApiResponse;
pub use current_user::{CurrentUser, USER_ID_HEADER};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
