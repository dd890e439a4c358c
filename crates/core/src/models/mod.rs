pub mod chart;
pub mod envelope;
pub mod query;
pub mod request;
pub mod settings;
pub mod zodiac;
