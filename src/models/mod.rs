//! Data Models Module
//!
//! Request and response DTOs shared by the store server and `HttpStore`.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
