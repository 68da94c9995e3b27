use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;

use reverie_nn::data::mnist_csv::{argmax, one_hot_target, read_mnist_csv};
use reverie_nn::data::picture::{load_grayscale_input, pixel_count, save_grayscale_png};
use reverie_nn::{evaluate, train_loop, Network, NetworkConfig, TrainConfig};

#[derive(Parser)]
#[command(version, about = "Two-layer sigmoid network: train, query and dream")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a freshly initialised network and save it
    Init {
        #[command(flatten)]
        network: NetworkArgs,
        /// Where to write the model JSON
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
    },
    /// Train on an MNIST-style CSV (label,p0,...,pN per line)
    Train {
        #[arg(long, value_name = "PATH")]
        train: PathBuf,
        /// Held-out CSV scored after every epoch
        #[arg(long, value_name = "PATH")]
        test: Option<PathBuf>,
        /// Continue from a saved model instead of initialising a new one
        #[arg(
            short,
            long,
            value_name = "PATH",
            conflicts_with_all = ["config", "input_nodes", "hidden_nodes", "output_nodes", "learning_rate", "seed"]
        )]
        model: Option<PathBuf>,
        #[command(flatten)]
        network: NetworkArgs,
        #[arg(short, long, value_name = "INT", default_value_t = 1)]
        epochs: usize,
        /// Shuffle sample order each epoch with this seed
        #[arg(long, value_name = "SEED")]
        shuffle: Option<u64>,
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
    },
    /// Classify a CSV or a single picture
    Query {
        #[arg(short, long, value_name = "PATH")]
        model: PathBuf,
        #[arg(long, value_name = "PATH", conflicts_with = "image")]
        csv: Option<PathBuf>,
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
        #[arg(long, default_value_t = 28)]
        width: u32,
        #[arg(long, default_value_t = 28)]
        height: u32,
    },
    /// Back-query a label and write the reconstructed input as a PNG
    Dream {
        #[arg(short, long, value_name = "PATH")]
        model: PathBuf,
        #[arg(short, long)]
        label: usize,
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
        #[arg(long, default_value_t = 28)]
        width: u32,
        #[arg(long, default_value_t = 28)]
        height: u32,
    },
}

/// Network shape for a new model, either from a JSON config or from flags.
#[derive(Args)]
struct NetworkArgs {
    /// NetworkConfig JSON; overrides the size flags below
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 784)]
    input_nodes: usize,
    #[arg(long, default_value_t = 256)]
    hidden_nodes: usize,
    #[arg(long, default_value_t = 10)]
    output_nodes: usize,
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl NetworkArgs {
    fn to_config(&self) -> Result<NetworkConfig> {
        match &self.config {
            Some(path) => NetworkConfig::load_json(path_str(path)?)
                .with_context(|| format!("loading network config {}", path.display())),
            None => Ok(NetworkConfig::new(
                self.input_nodes,
                self.hidden_nodes,
                self.output_nodes,
                self.learning_rate,
            )
            .with_seed(self.seed)),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init { network, out } => {
            let net = Network::new(network.to_config()?)?;
            save(&net, &out)?;
        }
        Command::Train {
            train,
            test,
            model,
            network,
            epochs,
            shuffle,
            out,
        } => {
            let mut net = match model {
                Some(path) => load(&path)?,
                None => Network::new(network.to_config()?)?,
            };
            let n_classes = net.config().output_nodes;

            let train_set = read_mnist_csv(path_str(&train)?, n_classes)
                .with_context(|| format!("reading {}", train.display()))?;
            let test_set = match &test {
                Some(path) => Some(
                    read_mnist_csv(path_str(path)?, n_classes)
                        .with_context(|| format!("reading {}", path.display()))?,
                ),
                None => None,
            };
            info!(samples = train_set.len(), "loaded training data");

            let mut config = TrainConfig::new(epochs);
            if let Some(seed) = shuffle {
                config = config.shuffled(seed);
            }
            let history = train_loop(&mut net, &train_set, test_set.as_deref(), &config)?;
            if let Some(last) = history.last() {
                println!("epochs: {}  train loss: {:.6}", last.epoch, last.train_loss);
                if let Some(p) = last.performance {
                    println!("performance: {p:.2}");
                }
            }
            save(&net, &out)?;
        }
        Command::Query {
            model,
            csv,
            image,
            width,
            height,
        } => {
            let net = load(&model)?;
            match (csv, image) {
                (Some(path), _) => {
                    let samples = read_mnist_csv(path_str(&path)?, net.config().output_nodes)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let scored = evaluate(&net, &samples)?;
                    println!(
                        "performance: {:.2} ({}/{})",
                        scored.performance(),
                        scored.correct,
                        scored.total
                    );
                }
                (None, Some(path)) => {
                    let inputs = load_grayscale_input(path_str(&path)?, width, height)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let outputs = net.query(&inputs)?;
                    match argmax(&outputs) {
                        Some(guess) => println!("guess: {guess}"),
                        None => bail!("network has no outputs"),
                    }
                }
                (None, None) => bail!("pass either --csv or --image"),
            }
        }
        Command::Dream {
            model,
            label,
            out,
            width,
            height,
        } => {
            let net = load(&model)?;
            let n_classes = net.config().output_nodes;
            if label >= n_classes {
                bail!("label {label} out of range for {n_classes} outputs");
            }
            let dream = net.backquery(&one_hot_target(label, n_classes))?;
            if dream.len() != pixel_count(width, height) {
                bail!("{width}x{height} picture cannot hold {} inputs", dream.len());
            }
            save_grayscale_png(&dream, width, height, path_str(&out)?)
                .with_context(|| format!("writing {}", out.display()))?;
            info!(label, path = %out.display(), "wrote dream");
        }
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("path {} is not valid UTF-8", path.display()))
}

fn load(path: &Path) -> Result<Network> {
    Network::load_json(path_str(path)?).with_context(|| format!("loading model {}", path.display()))
}

fn save(net: &Network, path: &Path) -> Result<()> {
    net.save_json(path_str(path)?)
        .with_context(|| format!("saving model {}", path.display()))?;
    info!(path = %path.display(), "saved model");
    Ok(())
}
