pub mod sigmoid;

pub use sigmoid::{logit, sigmoid, BAND_HIGH, BAND_LOW};
