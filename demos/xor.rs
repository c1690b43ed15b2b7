use tiny_infer::{
    model::{xor_spec, XOR_TRUTH_TABLE},
    ActivationKind, DenseLayer, Network, NetworkError, NetworkSpec, ScratchBuffers,
};

fn main() -> Result<(), NetworkError> {
    let dir = std::env::temp_dir();
    let spec_path = dir.join("tiny_infer_xor_spec.json");
    let network_path = dir.join("tiny_infer_xor_network.json");

    // Persist the spec (with metadata) and the bare network, then reload both.
    xor_spec().save_json(&spec_path)?;
    let spec = NetworkSpec::load_json(&spec_path)?;
    let network = spec.build()?;
    network.save_json(&network_path)?;
    let reloaded = Network::load_json(&network_path)?;

    println!("{} ({} layers)", spec.name, reloaded.num_layers());
    let meta = spec.metadata_or_default();
    for (input, expected) in XOR_TRUTH_TABLE {
        match reloaded.forward(&input) {
            Ok(output) => println!(
                "Input: {:?} -> Output: {:.4} (predicted {}, expected {})",
                input,
                output[0],
                meta.classify(output[0]),
                expected
            ),
            Err(err) => eprintln!("Input: {input:?} -> error: {err}"),
        }
    }

    // A randomly initialized 2 -> 8 -> 1 network, evaluated with one reused
    // scratch pair: the allocation count stays at two however many passes run.
    let random = Network::new(vec![
        (DenseLayer::random(2, 8, ActivationKind::Relu)?, ActivationKind::Relu),
        (DenseLayer::random(8, 1, ActivationKind::Sigmoid)?, ActivationKind::Sigmoid),
    ])?;
    let mut scratch = ScratchBuffers::new();
    let mut output = [0.0];
    println!("\nRandom 2-8-1 network:");
    for (input, _) in XOR_TRUTH_TABLE {
        match random.forward_with(&mut scratch, &input, &mut output) {
            Ok(()) => println!("Input: {:?} -> Output: {:.4}", input, output[0]),
            Err(err) => eprintln!("Input: {input:?} -> error: {err}"),
        }
    }
    println!("scratch allocations: {}", scratch.allocations());
    Ok(())
}
