pub mod check;
pub mod parse;
pub mod query_input;
pub mod suggest;
pub mod tokens;
