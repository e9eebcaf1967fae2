pub mod embeds;
pub mod format;
pub mod reply;

pub use embeds::*;
pub use format::{conform_external_str, format_number, format_time};
pub use reply::{Field, Reaction, Reply, Response, COLOR_FAIL, COLOR_OKAY};
