pub mod defaults;
pub mod flags;
