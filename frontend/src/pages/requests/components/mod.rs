pub mod confirmation;
pub mod fields;
pub mod form;
pub mod leave_fields;
pub mod schedule_fields;
