// Session bookkeeping and the HTTP surface of the intake conversation.

pub mod handlers;
pub mod registry;

pub use registry::SessionRegistry;
