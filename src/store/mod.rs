pub mod codec;
pub mod lock;
pub mod repo;
