pub mod answers;
pub mod lead;
pub mod locale;
pub mod risk;
