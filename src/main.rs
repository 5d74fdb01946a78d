use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use wikidex::{
    CommandExtractor,
    Error,
    QuerySession,
    Result,
    RunConfig,
    SearchIndex,
    builder,
    cli::{Cli, Command},
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("WIKIDEX_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        if let Error::Config(_) = err {
            let _ = Cli::command().print_help();
        }
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Index(args) => {
            let config = RunConfig::for_indexing(&args)?;
            let extractor = CommandExtractor::from_env();
            builder::build(&config, &extractor)?;
        }
        Command::Query(args) => {
            let config = RunConfig::for_query(&args)?;
            let index = SearchIndex::open(&config.index_dir)?;
            let session = QuerySession::new(&index, config.result_limit);
            session.run(std::io::stdin().lock(), std::io::stdout())?;
        }
    }

    Ok(())
}
