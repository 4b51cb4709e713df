use clap::{CommandFactory, Parser};
use declutter::cli::{Args, run};
use declutter::output::OutputFormatter;

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(&args) {
        // Bad command-line input exits through clap, with its usage text and code
        if let Some(kind) = e.usage_kind() {
            Args::command().error(kind, e).exit();
        }
        OutputFormatter::error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}
