//! Common types shared by every engine: the value model, the outcome type,
//! reserved field names and small concurrency helpers.

mod constants;
mod outcome;
mod util;
mod value;

pub use constants::*;
pub use outcome::*;
pub use util::*;
pub use value::*;
