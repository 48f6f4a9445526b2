use anyhow::Result;
use clap::Parser;
use engagestat::{
    cli::{Cli, OutputFormat},
    pipeline, report,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings (such as an unreadable input
/// file) always reach stderr, `--debug` shows everything
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.analysis_config()?;
    let report = pipeline::run(&args.path, &config, args.pipeline)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&report, &config)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }

    Ok(())
}
