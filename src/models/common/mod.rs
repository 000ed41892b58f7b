pub mod bulk;
pub mod response;
