pub mod calculator;
pub mod edit;
pub mod form;
pub mod listing;
pub mod viewport;
