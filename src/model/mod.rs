//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod dialogue;
pub mod error;
pub mod key_action;
pub mod token;

// Re-export for convenience
pub use dialogue::{
    AssetDecl, AssetKind, AvatarPosition, AvatarSpec, DialogueDocument, DialogueEntry,
    DialogueSet,
};
pub use error::{AppError, DocumentError, InputError};
pub use key_action::KeyAction;
pub use token::{detokenize, Token};
