pub mod common;
pub mod gallery;
pub mod generation;
pub mod studio;

pub use common::*;
pub use gallery::*;
pub use generation::*;
pub use studio::*;
