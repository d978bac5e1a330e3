//! Request handlers.

pub mod health;
pub mod options;
pub mod search;

pub use health::*;
pub use options::*;
pub use search::*;
