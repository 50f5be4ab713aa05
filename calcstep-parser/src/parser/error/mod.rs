pub mod kind;

pub use calcstep_error::Error;
