pub mod builder;
pub mod result;

pub use builder::{CompileRequest, CompileRequestBuilder, Resolution};
pub use result::CompileResult;
