pub mod documents;
pub mod portal;
pub mod requests;
