pub mod login;
pub mod comment;
pub mod thread;
pub mod reference;

pub use login::*;
pub use comment::*;
pub use thread::*;
pub use reference::*;
