use serde::{Serialize, Deserialize};
use crate::activation::ActivationKind;
use crate::errors::NetworkError;
use crate::layers::dense::DenseLayer;
use crate::network::metadata::ModelMetadata;
use crate::network::network::Network;

/// Describes one populated layer.
///
/// Fields:
/// - `input_size`  — values consumed (the previous layer's `output_size`, or
///                   the raw input dimension for the first layer)
/// - `output_size` — values produced
/// - `activation`  — applied after the affine transform
/// - `weights`     — `output_size * input_size` values, row-major by output
/// - `biases`      — one per output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub input_size: usize,
    pub output_size: usize,
    #[serde(default)]
    pub activation: ActivationKind,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl LayerSpec {
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: ActivationKind,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> LayerSpec {
        LayerSpec { input_size, output_size, activation, weights, biases }
    }

    /// Validates the shape and turns the spec into the layer at position `index`.
    pub(crate) fn into_layer(
        self,
        index: usize,
    ) -> Result<(DenseLayer, ActivationKind), NetworkError> {
        let layer = DenseLayer::checked(
            index,
            self.input_size,
            self.output_size,
            self.weights,
            self.biases,
        )?;
        Ok((layer, self.activation))
    }

    pub(crate) fn from_layer(layer: &DenseLayer, activation: ActivationKind) -> LayerSpec {
        LayerSpec {
            input_size: layer.input_size(),
            output_size: layer.output_size(),
            activation,
            weights: layer.weights().as_slice().to_vec(),
            biases: layer.biases().to_vec(),
        }
    }
}

/// Builds a network from `num_layers` layer specs.
///
/// `num_layers` must match `layer_specs.len()`; every spec must be well-shaped
/// and consecutive layers must chain.
pub fn create_network(
    num_layers: usize,
    layer_specs: Vec<LayerSpec>,
) -> Result<Network, NetworkError> {
    if num_layers != layer_specs.len() {
        return Err(NetworkError::LayerCountMismatch {
            expected: num_layers,
            actual: layer_specs.len(),
        });
    }
    Network::from_specs(layer_specs)
}

/// A named, fully populated network description plus optional metadata.
///
/// This is the JSON configuration format: it can be written by hand or saved
/// from an existing network, then turned into a `Network` with [`NetworkSpec::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name.
    pub name: String,
    /// Ordered list of layers (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl NetworkSpec {
    /// Captures the layers of an existing network.
    pub fn from_network(name: impl Into<String>, network: &Network) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            layers: network.to_specs(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> NetworkSpec {
        self.metadata = Some(metadata);
        self
    }

    pub fn build(&self) -> Result<Network, NetworkError> {
        create_network(self.layers.len(), self.layers.clone())
    }

    /// Metadata, or the defaults when none was stored.
    pub fn metadata_or_default(&self) -> ModelMetadata {
        self.metadata.clone().unwrap_or_default()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<(), NetworkError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        log::info!("saved network spec '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Deserializes a spec from a JSON file. The layers are not validated
    /// until [`NetworkSpec::build`].
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<NetworkSpec, NetworkError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        log::info!(
            "loaded network spec '{}' ({} layers) from {}",
            spec.name,
            spec.layers.len(),
            path.display()
        );
        Ok(spec)
    }
}
