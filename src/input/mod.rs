pub mod handler;

pub use handler::{apply_steer, InputHandler, KeyAction};
