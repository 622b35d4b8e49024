mod cli;
mod commands;
mod formatting;
mod logging;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_component, run_emit, run_extract, run_fetch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    logging::init(args.verbose);

    match args.command {
        Commands::Fetch {
            file,
            output,
            format,
        } => run_fetch(args.config, file, output, format).await,
        Commands::Component {
            file,
            input,
            node_id,
            name,
            output_dir,
            format,
        } => run_component(args.config, file, input, node_id, name, output_dir, format).await,
        Commands::Extract {
            file,
            layout,
            scale,
            format,
        } => run_extract(args.config, file, layout, scale, format).await,
        Commands::Emit {
            layout,
            name,
            output_dir,
            download_assets,
            format,
        } => run_emit(args.config, layout, name, output_dir, download_assets, format).await,
    }
}
