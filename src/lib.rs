pub mod api;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod pitch;
pub mod timeline;

pub use api::{compile, compile_audible, compile_with_options, parse_script};
pub use ast::*;
pub use error::*;
pub use options::PlayerOptions;
pub use timeline::SoundEvent;
