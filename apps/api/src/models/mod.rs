pub mod form;
pub mod letter;
