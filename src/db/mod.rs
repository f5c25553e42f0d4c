mod connection;
mod identifier;
mod introspection;
mod query;
mod session;

pub use connection::*;
pub use identifier::*;
pub use introspection::TEXT_TYPES;
pub use query::*;
pub use session::*;
