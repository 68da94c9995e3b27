//! Learns to tell the two diagonals of a 2×2 picture apart, then dreams each class.
use reverie_nn::data::mnist_csv::{argmax, one_hot_target};
use reverie_nn::{MseLoss, Network, NetworkConfig};

fn main() -> Result<(), reverie_nn::NetworkError> {
    let mut network = Network::new(NetworkConfig::new(4, 3, 2, 0.3).with_seed(7))?;

    // Pixels stay inside (0, 1) so the sigmoid never has to reach its asymptotes.
    let inputs = vec![
        vec![0.9, 0.1, 0.1, 0.9],
        vec![0.1, 0.9, 0.9, 0.1],
    ];
    let labels = [0usize, 1];

    let epochs = 2000;

    for epoch in 0..epochs {
        let mut loss = 0.0;
        for (input, &label) in inputs.iter().zip(labels.iter()) {
            let target = one_hot_target(label, 2);
            loss += MseLoss::loss(&network.query(input)?, &target);
            network.train(input, &target)?;
        }
        if epoch % 200 == 0 {
            println!("Epoch {epoch}: loss = {:.6}", loss / inputs.len() as f64);
        }
    }

    for input in &inputs {
        let output = network.query(input)?;
        println!("Input: {:?} -> Output: {:.4?} (guess {:?})", input, output, argmax(&output));
    }

    for label in labels {
        println!("Dream of {label}: {:.3?}", network.backquery(&one_hot_target(label, 2))?);
    }
    Ok(())
}
