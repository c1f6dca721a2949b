//! Connection lifecycle: channel handles, the session registry, and
//! connect-time authentication.

pub mod authenticator;
pub mod handle;
pub mod registry;

pub use authenticator::{AuthenticatedConnection, WsAuthenticator};
pub use handle::ChannelHandle;
pub use registry::SessionRegistry;
