use clap::Parser;
use sci::cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(args.log_level())
        .init()?;

    sci::cli::run(&args)
}
