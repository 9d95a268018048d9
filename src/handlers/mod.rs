mod shortened_url;

pub use shortened_url::{create_handler, remove_handler, resolve_handler};
