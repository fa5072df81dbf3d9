pub mod arrays;
pub mod async_iter;
pub mod base_calls;
pub mod delegates;
pub mod emitter;
pub mod lifting;
pub mod type_system;

pub use emitter::RuntimeCallEmitter;
