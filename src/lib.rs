pub mod cc;
mod check;
mod codegen;
mod reverse;
mod token;

pub use check::{check, CheckError, CheckErrorType};
pub use codegen::{translate, Codegen, TAPE_SIZE};
pub use reverse::{expansion, to_solfege};
pub use token::{tokenize, Token, VOCABULARY};
