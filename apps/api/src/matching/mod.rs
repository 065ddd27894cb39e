pub mod engine;
pub mod handlers;
pub mod lookup;
pub mod rank;
