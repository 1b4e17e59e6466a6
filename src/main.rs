use clap::Parser;
use ui_inspector::cli::commands::{cmd_dump, cmd_query, cmd_tree};
use ui_inspector::cli::config::{Cli, Commands, load_config, resolve_dump_endpoint};
use ui_inspector::trace::logger::{NullSink, TraceLogger, TraceSink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve trace file: CLI > config > disabled
    let trace_path = cli.trace.as_deref().or(config.trace.path.as_deref());
    let sink: Box<dyn TraceSink> = match trace_path {
        Some(path) => Box::new(TraceLogger::new(path)),
        None => Box::new(NullSink),
    };

    match cli.command {
        Commands::Dump { host, port, format } => {
            let (host, port) = resolve_dump_endpoint(host.as_deref(), port, &config.dump);
            cmd_dump(&host, port, &format, cli.verbose, sink.as_ref())?;
        }
        Commands::Tree {
            selector,
            root,
            format,
        } => {
            cmd_tree(
                &config.bridge,
                &selector,
                root.as_deref(),
                &format,
                cli.verbose,
                sink.as_ref(),
            )?;
        }
        Commands::Query { selector, property } => {
            cmd_query(&config.bridge, &selector, property.as_deref(), sink.as_ref())?;
        }
    }

    Ok(())
}
