mod object_store;
mod parameter_file;

pub use object_store::*;
pub use parameter_file::*;
