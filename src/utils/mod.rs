pub mod request;
pub(crate) mod signature;
