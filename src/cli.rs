use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::bytecode::CompiledProgram;
use crate::bytecode::disasm::print_bc;
use crate::config::Limits;
use crate::frontend::token_dumper::TokenDumper;
use crate::runtime::Interpreter;

/// Program run when no input file is given.
pub const DEMO_SOURCE: &str = r#"
int ahoj() {
   return 420;
}

int f() {
   return ahoj();
}

int main() {
   return f();
}
"#;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source file to compile and run. Runs a built-in demo when omitted
    pub input: Option<PathBuf>,
    /// INPUT is a compiled image written by --emit
    #[arg(long, requires = "input")]
    pub image: bool,
    /// Show tokens only
    #[arg(long)]
    pub tokens: bool,
    /// Disable ANSI colors in the token listing
    #[arg(long)]
    pub no_color: bool,
    /// Print tokens in source form instead of debug form
    #[arg(long)]
    pub pretty: bool,
    /// Print the disassembled bytecode before running
    #[arg(long = "bc", alias = "bytecode")]
    pub bytecode: bool,
    /// Write the compiled image to this file instead of running it
    #[arg(long)]
    pub emit: Option<PathBuf>,
    /// JSON file overriding capacity limits
    #[arg(long)]
    pub limits: Option<PathBuf>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn run(args: &Cli) -> anyhow::Result<()> {
    let limits = match &args.limits {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            Limits::from_json(&json).with_context(|| format!("Parsing {}", path.display()))?
        }
        None => Limits::default(),
    };

    // 1. ── Load ───────────────────────────────────────────────────────
    let program = if args.image {
        let Some(path) = &args.input else {
            anyhow::bail!("--image needs an input file");
        };
        let bytes = std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
        CompiledProgram::from_bytes(&bytes)
            .with_context(|| format!("Decoding image {}", path.display()))?
    } else {
        let source = match &args.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?,
            None => DEMO_SOURCE.to_string(),
        };

        let tokens = crate::tokenize(&source, &limits);
        if args.tokens {
            let mut dumper = TokenDumper::new();
            if args.no_color {
                dumper = dumper.no_color();
            }
            if args.pretty {
                dumper = dumper.pretty();
            }
            dumper.dump(&tokens);
            return Ok(());
        }

        // 2. ── Compile ────────────────────────────────────────────────
        crate::Parser::with_limits(tokens, &limits)
            .parse()
            .map_err(|e| {
                let hint = match &e {
                    crate::ParserError::Compile { source, .. } => source.hint(),
                    _ => None,
                };
                match hint {
                    Some(hint) => anyhow::anyhow!("{}\n  hint: {}", e, hint),
                    None => anyhow::anyhow!("{}", e),
                }
            })
            .context("Compiling")?
    };

    if args.bytecode {
        print_bc(&program);
    }

    // 3. ── Emit or run ────────────────────────────────────────────────
    if let Some(path) = &args.emit {
        let bytes = program.to_bytes().context("Encoding image")?;
        std::fs::write(path, bytes).with_context(|| format!("Writing {}", path.display()))?;
        log::info!("wrote image to {}", path.display());
        return Ok(());
    }

    let result = Interpreter::with_limits(limits)
        .run(&program)
        .context("Running")?;
    println!("RESULT: {}", result);
    Ok(())
}
