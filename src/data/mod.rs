pub mod picture;
pub mod mnist_csv;

pub use mnist_csv::{argmax, one_hot_target, parse_mnist_csv, read_mnist_csv, Sample};
