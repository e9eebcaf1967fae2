pub mod console;
pub mod options;
pub mod output;

pub use console::MessageAssembler;
pub use options::*;
pub use output::*;
