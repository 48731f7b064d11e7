pub(crate) mod claims;
pub mod extractors;
pub mod password;
pub mod token;
