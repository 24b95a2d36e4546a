pub mod cards;
pub use cards::*;
