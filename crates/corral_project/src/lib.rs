pub mod project;
pub mod utils;
pub mod verbosity;
