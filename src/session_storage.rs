mod flash;
mod internal;

pub use flash::{Flash, FlashKind, FlashMessages};
pub use internal::{AttachedSession, SessionId, SessionStorage};
