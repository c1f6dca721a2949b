//! Request and response wire types.

pub mod request;
pub mod response;

pub use request::CreateBloodRequestBody;
pub use response::ApiResponse;
