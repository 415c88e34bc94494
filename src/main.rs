use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use topo_render::utils::logger;
use topo_render::{CliConfig, LocalTemplateSource, Renderer, Result, RunSummary, TopologyEngine};

fn run(config: &CliConfig) -> Result<RunSummary> {
    let settings = config.resolve()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    // Templates are compiled before any input is read.
    let renderer = Renderer::load(&LocalTemplateSource::new(), &settings.templates)?;
    let engine = TopologyEngine::new(renderer, settings.options);

    let input: Box<dyn BufRead> = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    engine.run(input, io::stdout().lock())
}

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.monitor);
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(summary) => {
            tracing::debug!("Run summary: {:?}", summary);
        }
        Err(e) => {
            tracing::debug!("Run failed ({:?}): {:?}", e.category(), e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
