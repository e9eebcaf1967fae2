pub mod error;
pub mod executor;
pub mod traits;
pub mod wandbox;

pub use error::*;
pub use executor::CompileExecutor;
pub use traits::CompilationBackend;
pub use wandbox::{WandboxBackend, DEFAULT_WANDBOX_URL};
