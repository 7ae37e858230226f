pub mod codec;
pub mod context;
pub mod magic;
pub mod packet;
pub mod registry;
pub mod session;
pub mod state;

pub use codec::*;
pub use context::*;
pub use magic::*;
pub use packet::*;
pub use registry::*;
pub use session::ProtocolSession;
pub use state::*;
