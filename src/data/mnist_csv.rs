//! Parsing for digit datasets stored as MNIST-style CSV.
//!
//! Format:
//! - one sample per line: `label,p0,p1,...,pN`
//! - `label` is a class index in `[0, output_nodes)`
//! - each `p` is a raw pixel intensity in `[0, 255]`
//! - blank lines are skipped; there is no header row
//!
//! Pixels become network inputs through [`normalize_pixel`] and labels become
//! targets through [`one_hot_target`], so nothing ever hits exactly 0 or 1.
use crate::activation::sigmoid::{BAND_HIGH, BAND_LOW};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One labelled example, already encoded for the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: usize,
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Maps a pixel intensity in `[0, 255]` to `[0.01, 1.0]`.
pub fn normalize_pixel(value: f64) -> f64 {
    value / 255.0 * 0.99 + 0.01
}

/// Target vector with `0.99` at `label` and `0.01` everywhere else.
///
/// # Panics
/// Panics if `label >= n_classes`.
pub fn one_hot_target(label: usize, n_classes: usize) -> Vec<f64> {
    assert!(label < n_classes, "label {label} out of range for {n_classes} classes");
    let mut targets = vec![BAND_LOW; n_classes];
    targets[label] = BAND_HIGH;
    targets
}

/// Index of the largest value; the first one wins ties. `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, record)) if v <= record => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Parses CSV text into encoded samples.
///
/// Every row must have the same number of pixels; `n_classes` sizes the
/// target vectors and bounds the labels.
pub fn parse_mnist_csv(text: &str, n_classes: usize) -> Result<Vec<Sample>, DatasetError> {
    let mut samples: Vec<Sample> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = line.split(',');
        let label_cell = cells.next().unwrap_or_default().trim();
        let label: usize = label_cell.parse().map_err(|_| DatasetError::Parse {
            line: line_no,
            message: format!("label '{label_cell}' is not a non-negative integer"),
        })?;
        if label >= n_classes {
            return Err(DatasetError::Parse {
                line: line_no,
                message: format!("label {label} >= number of classes {n_classes}"),
            });
        }

        let inputs = cells
            .map(|c| {
                let c = c.trim();
                c.parse::<f64>().map(normalize_pixel).map_err(|_| DatasetError::Parse {
                    line: line_no,
                    message: format!("'{c}' is not a valid pixel value"),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if inputs.is_empty() {
            return Err(DatasetError::Parse {
                line: line_no,
                message: "row has a label but no pixels".into(),
            });
        }
        if let Some(first) = samples.first() {
            if first.inputs.len() != inputs.len() {
                return Err(DatasetError::Parse {
                    line: line_no,
                    message: format!(
                        "row has {} pixels, first row has {}",
                        inputs.len(),
                        first.inputs.len()
                    ),
                });
            }
        }

        samples.push(Sample {
            label,
            inputs,
            targets: one_hot_target(label, n_classes),
        });
    }

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

/// Reads and parses a CSV file. See [`parse_mnist_csv`].
pub fn read_mnist_csv(path: &str, n_classes: usize) -> Result<Vec<Sample>, DatasetError> {
    let text = std::fs::read_to_string(path)?;
    parse_mnist_csv(&text, n_classes)
}
