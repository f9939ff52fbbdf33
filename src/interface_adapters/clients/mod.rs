// The clients defined here are reqwest clients for talking to other HTTP services.

pub mod orcune;
pub mod proxy;

pub use orcune::{OrcuneClient, OrcuneClientError};
pub use proxy::ProxyClient;
