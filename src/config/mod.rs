//! Question configuration
//!
//! - `types`: callback aliases, `Dynamic` fields and small enums shared by
//!   the prompts
//! - `question`: the `Question` builder and its resolved form
//! - `loader`: question descriptors read from JSON or YAML files

pub mod loader;
pub mod question;
pub mod types;

pub use loader::{load_questions, load_questions_with, parse_questions, Format, QuestionDef};
pub use question::{Question, ResolvedQuestion};
pub use types::{
    Computation, Dynamic, FilterFn, Mask, Status, TransformerFn, ValidateFn, Validity,
};
