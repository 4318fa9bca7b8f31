pub mod profiles;
pub mod ranker;
pub mod result;
