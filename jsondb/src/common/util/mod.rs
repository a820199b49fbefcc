mod task_util;
mod type_utils;

pub use task_util::*;
pub use type_utils::*;
