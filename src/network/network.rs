use crate::{
    activation::ActivationKind,
    errors::{ForwardError, NetworkError},
    layers::dense::DenseLayer,
    network::{scratch::ScratchBuffers, spec::LayerSpec},
};
use serde::{Serialize, Deserialize};

/// An ordered stack of dense layers, each paired with the activation applied to
/// its output.
///
/// The network is immutable once built and holds no per-call state: every
/// forward pass works in its own scratch buffers, so a shared `&Network` can be
/// evaluated from several threads at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerSpec>", into = "Vec<LayerSpec>")]
pub struct Network {
    layers: Vec<DenseLayer>,
    activations: Vec<ActivationKind>,
}

impl Network {
    /// Builds a network from `(layer, activation)` pairs, input layer first.
    pub fn new(layers: Vec<(DenseLayer, ActivationKind)>) -> Result<Network, NetworkError> {
        let (layers, activations) = layers.into_iter().unzip();
        Network::from_parts(layers, activations)
    }

    /// Builds a network from parallel layer and activation lists.
    ///
    /// Rejects an empty stack, lists of different lengths, and any layer whose
    /// `input_size` differs from the previous layer's `output_size`.
    pub fn from_parts(
        layers: Vec<DenseLayer>,
        activations: Vec<ActivationKind>,
    ) -> Result<Network, NetworkError> {
        if layers.is_empty() {
            return Err(NetworkError::NoLayers);
        }
        if layers.len() != activations.len() {
            return Err(NetworkError::ActivationCountMismatch {
                layers: layers.len(),
                activations: activations.len(),
            });
        }
        for (k, pair) in layers.windows(2).enumerate() {
            if pair[1].input_size != pair[0].output_size {
                return Err(NetworkError::ChainMismatch {
                    layer: k + 1,
                    expected: pair[1].input_size,
                    actual: pair[0].output_size,
                });
            }
        }

        let network = Network { layers, activations };
        log::debug!(
            "built network: {} layers, {} -> {}",
            network.num_layers(),
            network.input_size(),
            network.output_size()
        );
        Ok(network)
    }

    /// Validates every spec and chains them into a network.
    pub fn from_specs(specs: Vec<LayerSpec>) -> Result<Network, NetworkError> {
        let layers = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| spec.into_layer(index))
            .collect::<Result<Vec<_>, _>>()?;
        Network::new(layers)
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Values consumed by the first layer; `0` for an empty network.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size)
    }

    /// Values produced by the last layer; `0` for an empty network.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.output_size)
    }

    /// Widest layer output.
    pub fn max_width(&self) -> usize {
        self.layers.iter().map(|l| l.output_size).max().unwrap_or(0)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn activations(&self) -> &[ActivationKind] {
        &self.activations
    }

    pub fn to_specs(&self) -> Vec<LayerSpec> {
        self.layers
            .iter()
            .zip(self.activations.iter())
            .map(|(layer, &activation)| LayerSpec::from_layer(layer, activation))
            .collect()
    }

    /// Runs the network on `input` and returns a fresh output vector of
    /// `output_size()` values.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>, ForwardError> {
        let width = self.output_size();
        // At least one slot so an empty output never masks a network error.
        let mut output = vec![0.0; width.max(1)];
        self.forward_into(input, &mut output)?;
        output.truncate(width);
        Ok(output)
    }

    /// Runs the network on `input`, writing the result into the first
    /// `output_size()` slots of `output`.
    pub fn forward_into(&self, input: &[f64], output: &mut [f64]) -> Result<(), ForwardError> {
        let mut scratch = ScratchBuffers::new();
        self.forward_with(&mut scratch, input, output)
    }

    /// Like [`Network::forward_into`] but reuses caller-owned scratch buffers,
    /// growing them only when this network needs more room than they have.
    ///
    /// Only the first `input_size()` values of `input` are read. On error the
    /// output buffer is left untouched.
    pub fn forward_with(
        &self,
        scratch: &mut ScratchBuffers,
        input: &[f64],
        output: &mut [f64],
    ) -> Result<(), ForwardError> {
        let result = self.run(scratch, input, output);
        if let Err(err) = &result {
            log::warn!("forward pass rejected: {err}");
        }
        result
    }

    fn run(
        &self,
        scratch: &mut ScratchBuffers,
        input: &[f64],
        output: &mut [f64],
    ) -> Result<(), ForwardError> {
        let (first, last) = match (self.layers.first(), self.layers.last()) {
            (Some(first), Some(last)) if self.activations.len() == self.layers.len() => {
                (first, last)
            }
            _ => return Err(ForwardError::InvalidNetwork),
        };
        if self
            .layers
            .windows(2)
            .any(|pair| pair[1].input_size != pair[0].output_size)
        {
            return Err(ForwardError::InvalidNetwork);
        }

        if input.is_empty() || output.is_empty() || output.len() < last.output_size {
            return Err(ForwardError::InvalidBuffers);
        }

        let max_width = self.max_width();
        if max_width == 0 {
            return Err(ForwardError::CorruptedConfiguration);
        }

        if first.input_size == 0 || input.len() < first.input_size {
            return Err(ForwardError::InvalidInputSize {
                expected: first.input_size,
                actual: input.len(),
            });
        }

        // The first layer may be wider on its input side than any layer output.
        scratch.ensure_width(max_width.max(first.input_size))?;
        scratch.input_mut()[..first.input_size].copy_from_slice(&input[..first.input_size]);

        let n = self.layers.len();
        let pairs = self.layers.iter().zip(self.activations.iter());
        for (k, (layer, activation)) in pairs.enumerate() {
            {
                let (current_in, current_out) = scratch.split();
                let out = &mut current_out[..layer.output_size];
                layer.compute(&current_in[..layer.input_size], out);
                activation.apply(out);
            }
            log::trace!(
                "layer {k}: {} -> {} ({activation:?})",
                layer.input_size,
                layer.output_size
            );

            if k + 1 < n {
                scratch.swap();
            }
        }

        output[..last.output_size].copy_from_slice(&scratch.output()[..last.output_size]);
        Ok(())
    }

    /// Releases every layer's weights and biases and the activation list,
    /// leaving an empty network. Calling it again is a no-op.
    pub fn clear(&mut self) {
        if self.layers.is_empty() && self.activations.is_empty() {
            return;
        }
        log::debug!("releasing network with {} layers", self.layers.len());
        self.layers = Vec::new();
        self.activations = Vec::new();
    }

    /// Consumes the network, releasing everything it owns.
    pub fn free(mut self) {
        self.clear();
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<(), NetworkError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        log::info!("saved {}-layer network to {}", self.num_layers(), path.display());
        Ok(())
    }

    /// Deserializes and validates a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<Network, NetworkError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        log::info!("loaded {}-layer network from {}", network.num_layers(), path.display());
        Ok(network)
    }
}

impl TryFrom<Vec<LayerSpec>> for Network {
    type Error = NetworkError;

    fn try_from(specs: Vec<LayerSpec>) -> Result<Self, Self::Error> {
        Network::from_specs(specs)
    }
}

impl From<Network> for Vec<LayerSpec> {
    fn from(network: Network) -> Self {
        network.to_specs()
    }
}

/// Releases `network` if there is one; `None` is a no-op.
pub fn free(network: Option<Network>) {
    if let Some(network) = network {
        network.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(input_size: usize, output_size: usize, weight: f64, bias: f64) -> DenseLayer {
        DenseLayer::new(
            input_size,
            output_size,
            vec![weight; input_size * output_size],
            vec![bias; output_size],
        )
        .unwrap()
    }

    fn identity_chain() -> Network {
        Network::new(vec![
            (layer(2, 3, 1.0, 0.0), ActivationKind::None),
            (layer(3, 1, 1.0, 0.0), ActivationKind::None),
        ])
        .unwrap()
    }

    #[test]
    fn chain_mismatch_is_rejected_at_construction() {
        let err = Network::new(vec![
            (layer(2, 3, 1.0, 0.0), ActivationKind::None),
            (layer(2, 1, 1.0, 0.0), ActivationKind::None),
        ])
        .unwrap_err();
        assert!(matches!(err, NetworkError::ChainMismatch { layer: 1, expected: 2, actual: 3 }));
    }

    #[test]
    fn empty_and_mismatched_lists_are_rejected() {
        assert!(matches!(Network::new(vec![]), Err(NetworkError::NoLayers)));
        assert!(matches!(
            Network::from_parts(vec![layer(1, 1, 1.0, 0.0)], vec![]),
            Err(NetworkError::ActivationCountMismatch { layers: 1, activations: 0 })
        ));
    }

    #[test]
    fn forward_sums_through_layers() {
        // Hidden = [3, 3, 3], output = 9.
        let out = identity_chain().forward(&[1.0, 2.0]).unwrap();
        assert_eq!(out, vec![9.0]);
    }

    #[test]
    fn extra_input_values_are_ignored() {
        let out = identity_chain().forward(&[1.0, 2.0, 100.0]).unwrap();
        assert_eq!(out, vec![9.0]);
    }

    #[test]
    fn activation_is_applied_per_layer() {
        let network = Network::new(vec![
            (layer(1, 2, -1.0, 0.0), ActivationKind::Relu),
            (layer(2, 1, 1.0, 0.5), ActivationKind::None),
        ])
        .unwrap();
        assert_eq!(network.forward(&[4.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn input_wider_than_every_output_fits_in_scratch() {
        let network = Network::new(vec![(layer(6, 2, 1.0, 0.0), ActivationKind::None)]).unwrap();
        assert_eq!(network.forward(&[1.0; 6]).unwrap(), vec![6.0, 6.0]);
    }

    #[test]
    fn stale_scratch_values_never_leak_into_narrow_layers() {
        // 1 -> 4 -> 1 -> 2: the 1-wide layer must only see one value even though
        // the scratch buffer still holds three stale entries from the 4-wide layer.
        let network = Network::new(vec![
            (layer(1, 4, 1.0, 0.0), ActivationKind::None),
            (layer(4, 1, 1.0, 0.0), ActivationKind::None),
            (layer(1, 2, 1.0, 0.0), ActivationKind::None),
        ])
        .unwrap();
        assert_eq!(network.forward(&[1.0]).unwrap(), vec![4.0, 4.0]);
    }

    #[test]
    fn empty_network_is_invalid() {
        let network = Network::default();
        assert_eq!(network.forward(&[1.0]), Err(ForwardError::InvalidNetwork));
    }

    #[test]
    fn mismatched_activation_list_is_invalid() {
        let network = Network {
            layers: vec![layer(1, 1, 1.0, 0.0)],
            activations: vec![],
        };
        assert_eq!(network.forward(&[1.0]), Err(ForwardError::InvalidNetwork));
    }

    #[test]
    fn all_zero_widths_are_corrupted() {
        let mut broken = layer(1, 1, 1.0, 0.0);
        broken.output_size = 0;
        let network = Network {
            layers: vec![broken],
            activations: vec![ActivationKind::None],
        };
        assert_eq!(network.forward(&[1.0]), Err(ForwardError::CorruptedConfiguration));
    }

    #[test]
    fn zero_first_input_width_is_invalid_input_size() {
        let mut broken = layer(1, 1, 1.0, 0.0);
        broken.input_size = 0;
        let network = Network {
            layers: vec![broken],
            activations: vec![ActivationKind::None],
        };
        assert_eq!(
            network.forward(&[1.0]),
            Err(ForwardError::InvalidInputSize { expected: 0, actual: 1 })
        );
    }

    #[test]
    fn empty_buffers_are_rejected() {
        let network = identity_chain();
        assert_eq!(network.forward(&[]), Err(ForwardError::InvalidBuffers));
        let mut out: [f64; 0] = [];
        assert_eq!(network.forward_into(&[1.0, 2.0], &mut out), Err(ForwardError::InvalidBuffers));
    }

    #[test]
    fn short_input_is_rejected_without_writing_output() {
        let network = identity_chain();
        let mut out = [42.0];
        assert_eq!(
            network.forward_into(&[1.0], &mut out),
            Err(ForwardError::InvalidInputSize { expected: 2, actual: 1 })
        );
        assert_eq!(out, [42.0]);
    }

    #[test]
    fn reused_scratch_allocates_once() {
        let network = identity_chain();
        let mut scratch = ScratchBuffers::new();
        let mut out = [0.0];
        for _ in 0..5 {
            network.forward_with(&mut scratch, &[1.0, 2.0], &mut out).unwrap();
            assert_eq!(out, [9.0]);
        }
        assert_eq!(scratch.allocations(), 2);
    }

    #[test]
    fn allocation_count_does_not_depend_on_depth() {
        let deep = Network::new(
            (0..32)
                .map(|_| (layer(3, 3, 0.1, 0.0), ActivationKind::Sigmoid))
                .collect(),
        )
        .unwrap();
        let mut scratch = ScratchBuffers::new();
        let mut out = [0.0; 3];
        deep.forward_with(&mut scratch, &[1.0, 1.0, 1.0], &mut out).unwrap();
        assert_eq!(scratch.allocations(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut network = identity_chain();
        network.clear();
        assert!(network.is_empty());
        assert!(network.activations().is_empty());
        network.clear();
        assert_eq!(network.forward(&[1.0, 2.0]), Err(ForwardError::InvalidNetwork));
    }

    #[test]
    fn free_accepts_absent_and_empty_networks() {
        free(None);
        free(Some(Network::default()));
        Network::default().free();
        identity_chain().free();
    }

    #[test]
    fn serde_rejects_broken_chains() {
        let json = r#"[
            {"input_size": 2, "output_size": 2, "activation": "relu",
             "weights": [1,1,1,1], "biases": [0,0]},
            {"input_size": 3, "output_size": 1, "activation": "none",
             "weights": [1,1,1], "biases": [0]}
        ]"#;
        assert!(serde_json::from_str::<Network>(json).is_err());
    }

    #[test]
    fn serde_round_trip_preserves_network() {
        let network = identity_chain();
        let json = serde_json::to_string(&network).unwrap();
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, network);
    }
}
