pub mod guard;
pub mod password;
pub mod session;

pub use guard::{AdminUser, CurrentUser};
pub use session::{Flash, FlashLevel, MemorySessionStore, SessionData, SessionKeys, SessionStore};
