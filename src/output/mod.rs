// Output generation module

pub mod readme;
pub mod templates;

pub use readme::*;
pub use templates::*;
