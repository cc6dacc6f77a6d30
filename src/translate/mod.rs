pub mod error;
pub mod interface;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod recovery;
pub mod validate;

pub use error::{RecoveryError, TranslateError};
pub use interface::*;
pub use orchestrator::{recover_output, Translator};
pub use validate::ValidatedOutput;
