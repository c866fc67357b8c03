#![forbid(unsafe_code)]

use clap::Parser;
use delta_plan::cli::{Cli, run};

fn main() {
    let cli = Cli::parse();
    let json = cli.json_output();
    delta_plan::init_tracing(cli.verbose);
    let stdout = std::io::stdout();
    if let Err(error) = run(cli, &mut stdout.lock()) {
        if json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("{error}");
        }
        std::process::exit(error.exit_code());
    }
}
