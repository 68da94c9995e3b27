pub mod config;
pub mod network;
pub mod state;

pub use config::NetworkConfig;
pub use network::{all_finite, Network};
pub use state::NetworkState;
