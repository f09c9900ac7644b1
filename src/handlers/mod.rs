//! Event Handlers
//!
//! - keyboard: dialogs first, then open menus, then global keys
//! - mouse: clicks, hover, wheel and drag-and-drop onto folders

pub mod keyboard;
pub mod mouse;

pub use keyboard::handle_key;
pub use mouse::handle_mouse;
