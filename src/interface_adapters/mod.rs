// Interface adapters: wire protocol, service client, and engine adapters.

pub mod clients;
pub mod net;
pub mod protocol;
pub mod sandbox;
pub mod utils;
