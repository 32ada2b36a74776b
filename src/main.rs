//! image-trans-cli entry point

use image_trans_cli::cli::{Args, Runner};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let runner = Runner::new(Args::parse_args());

    match runner.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            runner.logger().error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
