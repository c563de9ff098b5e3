pub mod account;
pub mod favorites;
pub mod query;
pub mod stats;
