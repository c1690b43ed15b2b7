use crate::{
    activation::ActivationKind,
    errors::NetworkError,
    math::matrix::Matrix,
};

/// One fully-connected transform: `output = W · input + b`.
///
/// `weights` has `output_size` rows and `input_size` columns; entry `(o, i)` is
/// the weight from input neuron `i` to output neuron `o`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    pub(crate) input_size: usize,
    pub(crate) output_size: usize,
    pub(crate) weights: Matrix,
    pub(crate) biases: Vec<f64>,
}

impl DenseLayer {
    /// Builds a layer from flat row-major weights and one bias per output.
    ///
    /// Shape errors are reported against layer index 0; `Network` construction
    /// goes through [`DenseLayer::checked`] to report the real position.
    pub fn new(
        input_size: usize,
        output_size: usize,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> Result<DenseLayer, NetworkError> {
        DenseLayer::checked(0, input_size, output_size, weights, biases)
    }

    pub(crate) fn checked(
        index: usize,
        input_size: usize,
        output_size: usize,
        weights: Vec<f64>,
        biases: Vec<f64>,
    ) -> Result<DenseLayer, NetworkError> {
        if input_size == 0 || output_size == 0 {
            return Err(NetworkError::ZeroSizedLayer { layer: index });
        }
        if biases.len() != output_size {
            return Err(NetworkError::BiasCountMismatch {
                layer: index,
                expected: output_size,
                actual: biases.len(),
            });
        }
        let expected = weight_count(index, input_size, output_size)?;
        let actual = weights.len();
        let weights = Matrix::from_vec(output_size, input_size, weights)
            .ok_or(NetworkError::WeightCountMismatch { layer: index, expected, actual })?;
        Ok(DenseLayer { input_size, output_size, weights, biases })
    }

    /// A layer whose weights and biases are all zero.
    pub fn zeros(input_size: usize, output_size: usize) -> Result<DenseLayer, NetworkError> {
        let count = weight_count(0, input_size, output_size)?;
        DenseLayer::new(input_size, output_size, vec![0.0; count], vec![0.0; output_size])
    }

    /// Randomly initialized weights with zero biases: He init in front of a
    /// ReLU, Xavier otherwise.
    pub fn random(
        input_size: usize,
        output_size: usize,
        activation: ActivationKind,
    ) -> Result<DenseLayer, NetworkError> {
        if input_size == 0 || output_size == 0 {
            return Err(NetworkError::ZeroSizedLayer { layer: 0 });
        }
        weight_count(0, input_size, output_size)?;
        let weights = match activation {
            ActivationKind::Relu => Matrix::he(output_size, input_size),
            ActivationKind::Sigmoid | ActivationKind::None => {
                Matrix::xavier(output_size, input_size)
            }
        };
        DenseLayer::new(input_size, output_size, weights.into_vec(), vec![0.0; output_size])
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Writes the affine transform of `input` into `output`.
    ///
    /// `input` must hold exactly `input_size` values and `output` exactly
    /// `output_size`; callers inside the crate slice scratch buffers to those
    /// lengths. Each output is accumulated as `bias[o]` followed by the row's
    /// products from left to right. No activation is applied.
    pub fn compute(&self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), self.input_size, "dense input length");
        debug_assert_eq!(output.len(), self.output_size, "dense output length");

        for (o, (out, &bias)) in output.iter_mut().zip(self.biases.iter()).enumerate() {
            let mut sum = bias;
            for (w, x) in self.weights.row(o).iter().zip(input.iter()) {
                sum += w * x;
            }
            *out = sum;
        }
    }

    /// Allocating variant of [`DenseLayer::compute`].
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = vec![0.0; self.output_size];
        self.compute(input, &mut output);
        output
    }
}

/// `input_size * output_size`, or `LayerTooLarge` when the product overflows.
fn weight_count(
    index: usize,
    input_size: usize,
    output_size: usize,
) -> Result<usize, NetworkError> {
    input_size
        .checked_mul(output_size)
        .ok_or(NetworkError::LayerTooLarge { layer: index, input_size, output_size })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_yields_biases() {
        let weights = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let layer = DenseLayer::new(3, 2, weights, vec![0.5, -1.5]).unwrap();
        assert_eq!(layer.forward(&[0.0, 0.0, 0.0]), vec![0.5, -1.5]);
    }

    #[test]
    fn compute_is_row_major_matvec_plus_bias() {
        // [[1, 2, 3], [4, 5, 6]] · [1, 0, -1] + [10, 20]
        let weights = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let layer = DenseLayer::new(3, 2, weights, vec![10.0, 20.0]).unwrap();
        let mut out = [0.0; 2];
        layer.compute(&[1.0, 0.0, -1.0], &mut out);
        assert_eq!(out, [8.0, 18.0]);
    }

    #[test]
    fn compute_does_not_apply_activation() {
        let layer = DenseLayer::new(1, 1, vec![-2.0], vec![0.0]).unwrap();
        assert_eq!(layer.forward(&[3.0]), vec![-6.0]);
    }

    #[test]
    fn shape_errors_are_reported() {
        assert!(matches!(
            DenseLayer::new(0, 2, vec![], vec![0.0, 0.0]),
            Err(NetworkError::ZeroSizedLayer { layer: 0 })
        ));
        assert!(matches!(
            DenseLayer::new(2, 2, vec![0.0; 3], vec![0.0, 0.0]),
            Err(NetworkError::WeightCountMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            DenseLayer::new(2, 2, vec![0.0; 4], vec![0.0]),
            Err(NetworkError::BiasCountMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let err = DenseLayer::new(1 << 63, 2, vec![], vec![0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::LayerTooLarge { layer: 0, input_size, output_size: 2 }
                if input_size == 1 << 63
        ));
        assert!(matches!(
            DenseLayer::zeros(usize::MAX, 2),
            Err(NetworkError::LayerTooLarge { .. })
        ));
        assert!(matches!(
            DenseLayer::random(usize::MAX, 2, ActivationKind::Relu),
            Err(NetworkError::LayerTooLarge { .. })
        ));
    }

    #[test]
    fn zeros_layer_outputs_zeros() {
        let layer = DenseLayer::zeros(2, 3).unwrap();
        assert_eq!(layer.forward(&[5.0, -5.0]), vec![0.0; 3]);
    }

    #[test]
    fn random_layer_has_zero_biases() {
        let layer = DenseLayer::random(5, 3, ActivationKind::Relu).unwrap();
        assert_eq!(layer.weights().len(), 15);
        assert_eq!(layer.biases(), &[0.0; 3]);
    }
}
