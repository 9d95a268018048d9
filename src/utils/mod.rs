pub mod hash;
pub mod id_generator;

pub use id_generator::{HashGenerator, ShortIdGenerator};
