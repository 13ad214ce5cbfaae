use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use anyhow::Context;
use clap::Parser as ClapParser;
use teachlang::{
    lexer::lexer::tokenize,
    parser::{
        parser::{parse, Parser},
        symbols::Role,
    },
    render_error,
};
use tracing::{info, Level};

#[derive(ClapParser)]
#[command(name = "teachlang")]
#[command(about = "Tokenizes and checks a teachlang program", version)]
struct Cli {
    /// Source file to check
    file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Print declared variables and their occurrences after parsing
    #[arg(long)]
    symbols: bool,

    /// Log each parsing step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let start = Instant::now();
    let tokens = tokenize(source.clone(), Some(file_name.clone()));
    info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    if cli.tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let (parser, result) = parse(tokens, Rc::new(file_name));
    info!(elapsed = ?parse_start.elapsed(), "parsed");

    if cli.symbols {
        print_symbols(&parser);
    }

    let status = match &result {
        Ok(()) => {
            println!("Parsing completed successfully!");
            ExitCode::SUCCESS
        }
        Err(error) => {
            println!("Parsing failed: {}", error);
            print!("{}", render_error(error, &source));
            ExitCode::FAILURE
        }
    };

    for error in parser.errors() {
        println!("{}", error);
        print!("{}", render_error(error, &source));
    }

    Ok(status)
}

fn print_symbols(parser: &Parser) {
    let symbols = parser.symbols();
    println!("Declared variables ({}):", symbols.len());

    for (name, ty) in symbols.variables() {
        println!("  {}: {}", name, ty);

        for occurrence in symbols.occurrences(name) {
            let role = match &occurrence.role {
                Role::Declaration { ty: Some(ty) } => format!("declared {}", ty),
                Role::Declaration { ty: None } => String::from("declared"),
                Role::Use {
                    observed: Some(literal),
                } => format!("assigned {:?} literal", literal),
                Role::Use { observed: None } => String::from("used"),
            };
            println!(
                "    @{} (depth {}) {}",
                occurrence.position.0, occurrence.scope, role
            );
        }
    }
}
