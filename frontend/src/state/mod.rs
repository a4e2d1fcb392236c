pub mod backend;
pub mod directory;
