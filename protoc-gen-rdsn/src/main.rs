//! `protoc` plugin entry point.
//!
//! Usage: `protoc --plugin=protoc-gen-rdsn --rdsn_out=<dir> [--rdsn_opt=namespace=<lang>] ...`

use anyhow::{Context, Result};
use prost::Message;
use std::io::{Read, Write};

fn main() -> Result<()> {
    // stdout carries the response; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read request from stdin")?;

    let response = match rdsn_schema::decode_request(&input) {
        Ok(request) => protoc_gen_rdsn::run(&request),
        Err(e) => {
            let error = anyhow::Error::new(e).context("Failed to decode CodeGeneratorRequest");
            protoc_gen_rdsn::error_response(&error)
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .context("Failed to write response to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
