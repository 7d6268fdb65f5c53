pub mod mention;
pub mod quote;
pub mod contextual;
pub mod validate;
pub mod pass;

pub use mention::*;
pub use quote::*;
pub use contextual::*;
pub use validate::*;
pub use pass::*;

#[cfg(test)]
mod tests;
