pub mod cache;
pub mod catalog;

pub use cache::CompilerRegistry;
pub use catalog::{
    Catalog, CompilerEntry, DenyList, Language, DEFAULT_BROKEN_COMPILERS,
    DEFAULT_BROKEN_LANGUAGES,
};
