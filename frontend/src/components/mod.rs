pub mod employee_search;
pub mod error;
pub mod layout;
