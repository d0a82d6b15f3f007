pub mod arena;
pub mod physics;
pub mod pool;
pub mod session;
pub mod time;
