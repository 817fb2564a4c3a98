// Accounts and access: bcrypt password hashing, HS256 bearer tokens, and the
// `AuthUser` extractor every protected handler takes.

pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractor::AuthUser;
