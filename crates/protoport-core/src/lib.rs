pub mod error;
pub mod lang;
pub mod path;
pub mod scratch;

pub use error::CoreError;
pub use lang::TargetLanguage;
pub use path::{ensure_dir, is_proto_file, PROTO_SUFFIX};
pub use scratch::ScratchDir;
