use crate::{
    activation::ActivationKind,
    errors::NetworkError,
    network::{metadata::ModelMetadata, spec::{LayerSpec, NetworkSpec}, network::Network},
};

/// XOR truth table as `(inputs, expected)` pairs.
pub const XOR_TRUTH_TABLE: [([f64; 2], u8); 4] = [
    ([0.0, 0.0], 0),
    ([0.0, 1.0], 1),
    ([1.0, 0.0], 1),
    ([1.0, 1.0], 0),
];

/// Hand-picked 2 → 2 → 1 sigmoid network approximating XOR.
///
/// ```text
/// h1 = sigmoid( 20·x1 + 20·x2 - 10)    // roughly OR
/// h2 = sigmoid(-20·x1 - 20·x2 + 30)    // roughly NAND
/// y  = sigmoid( 20·h1 + 20·h2 - 30)    // AND of the two
/// ```
pub fn xor_spec() -> NetworkSpec {
    NetworkSpec {
        name: "xor".to_string(),
        layers: vec![
            LayerSpec::new(
                2,
                2,
                ActivationKind::Sigmoid,
                vec![20.0, 20.0, -20.0, -20.0],
                vec![-10.0, 30.0],
            ),
            LayerSpec::new(2, 1, ActivationKind::Sigmoid, vec![20.0, 20.0], vec![-30.0]),
        ],
        metadata: Some(ModelMetadata {
            description: Some("Hardcoded XOR demo network".to_string()),
            input_labels: Some(vec!["x1".to_string(), "x2".to_string()]),
            output_labels: Some(vec!["x1 xor x2".to_string()]),
            decision_threshold: Some(0.5),
        }),
    }
}

pub fn xor_network() -> Result<Network, NetworkError> {
    xor_spec().build()
}
