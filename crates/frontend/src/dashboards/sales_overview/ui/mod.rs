pub mod dashboard;
pub mod record_form;
pub mod records_table;
