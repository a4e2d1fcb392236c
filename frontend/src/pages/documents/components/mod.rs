pub mod certificate_fields;
pub mod confirmation;
pub mod form;
