pub mod family;
pub mod limit;
pub mod parse;
