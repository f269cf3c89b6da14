//! Demonstration entry point: generates test cases for a hard-coded
//! requirement and pretty-prints the result.
//!
//! # Running
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."        # or GEMINI_API_KEY with TESTGEN_PROVIDER=gemini
//! cargo run
//! ```

use testgen_llm::{to_pretty_json, GeneratorClient, TestCaseGenerator, TestCaseProvider};
use tracing_subscriber::EnvFilter;

const MOCK_REQUIREMENT: &str = "The clinician dashboard must allow the user to filter patient records by 'Sleep Apnea Severity' \
     and export the resulting list as a CSV file. The export process must not take longer than 5 seconds \
     for up to 1000 records.";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Credential comes from the environment; absence fails startup before
    // any generation call is attempted
    let client = match GeneratorClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error initializing LLM client: {e}");
            eprintln!(
                "Please ensure the OPENAI_API_KEY (or GEMINI_API_KEY with \
                 TESTGEN_PROVIDER=gemini) environment variable is set."
            );
            std::process::exit(1);
        }
    };

    let provider_name = client.provider_name();
    let generator = TestCaseGenerator::new(client);

    println!("Requirement: {MOCK_REQUIREMENT}\n");
    println!("--- Sending request to {provider_name} LLM...");

    match generator.generate_test_cases(MOCK_REQUIREMENT).await {
        Ok(cases) => {
            println!("--- Successfully Generated Test Cases ---");
            match to_pretty_json(&cases) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing test cases: {e}");
                    std::process::exit(1);
                }
            }
            println!("\nTotal Test Cases Generated: {}", cases.len());
        }
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
    }
}
