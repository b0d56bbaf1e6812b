mod character;
mod record;

pub use character::*;
pub use record::*;
