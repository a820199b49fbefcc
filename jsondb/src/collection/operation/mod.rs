mod insert_operations;
mod read_operations;
mod update_operations;

pub use insert_operations::*;
pub use read_operations::*;
pub use update_operations::*;
