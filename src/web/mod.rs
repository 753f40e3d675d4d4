//! Everything that touches `web-sys`. The rest of the crate is plain Rust.

pub mod app;
pub mod bindings;
pub mod hanzi_writer;
pub mod timer;
pub mod view;

pub use app::{SharedController, dispatch, launch};
pub use view::show_toast;
