// Truth-table driver for the hardcoded XOR model.
// All inference logic lives in the library (src/lib.rs and its modules).
use std::process::ExitCode;

use tiny_infer::model::{xor_spec, XOR_TRUTH_TABLE};

fn main() -> ExitCode {
    let spec = xor_spec();
    let network = match spec.build() {
        Ok(network) => network,
        Err(err) => {
            eprintln!("[tiny-infer] Failed to create XOR demo network: {err}");
            return ExitCode::FAILURE;
        }
    };
    let meta = spec.metadata_or_default();

    println!("tiny-infer - Tiny Neural Inference Engine");
    println!("XOR demo with a hardcoded neural network model");
    println!("{}", "-".repeat(49));

    let mut output = [0.0; 1];
    for (i, (input, expected)) in XOR_TRUTH_TABLE.iter().enumerate() {
        if let Err(err) = network.forward_into(input, &mut output) {
            eprintln!("[tiny-infer] Forward pass failed on sample {i}: {err}");
            continue;
        }

        println!(
            "Input: ({:.1}, {:.1}) -> raw = {:.4}, predicted = {}, expected = {}",
            input[0],
            input[1],
            output[0],
            meta.classify(output[0]),
            expected
        );
    }

    network.free();
    ExitCode::SUCCESS
}
