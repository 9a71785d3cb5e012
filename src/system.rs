//! Operating system integrations: the clipboard and the default document
//! opener.

mod clipboard;
mod opener;

pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use opener::{DocumentOpener, OpenError, SystemOpener};
