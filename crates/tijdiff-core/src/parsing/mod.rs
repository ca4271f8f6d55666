pub mod date;
pub mod totals;
pub mod values;
