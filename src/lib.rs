pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use network::{all_finite, Network, NetworkConfig, NetworkState};
pub use loss::mse::MseLoss;
pub use train::{evaluate, train_loop, TrainConfig, EpochStats, Evaluation};
pub use data::mnist_csv::Sample;
pub use error::{DatasetError, NetworkError};
