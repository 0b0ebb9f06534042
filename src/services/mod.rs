pub mod batch;
pub mod loader;
pub mod naming;
pub mod tools;

pub use batch::BatchConverter;
pub use loader::load_source;
pub use tools::{CommandEditor, FileOverlaySink};
