use clap::{Args, Parser as ClapParser, Subcommand};
use lox_expr::config::Config;
use lox_expr::error::{Diagnostics, LoxError, RuntimeError, SyntaxError};
use lox_expr::printer::AstPrinter;
use lox_expr::report::Report;
use lox_expr::run;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(version, about = "Lox expression interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the expression stored in a file
    Run {
        /// Path to the source file
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Evaluate an expression given on the command line
    Eval {
        /// Source text of the expression
        source: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Start an interactive prompt (the default)
    Repl {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init,
    /// Print where the config file is looked up
    Path,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the scanned tokens
    #[arg(long)]
    tokens: bool,
    /// Print the parsed tree in prefix form
    #[arg(long)]
    ast: bool,
    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,
    /// Maximum nesting and tree height of an expression
    #[arg(long)]
    max_depth: Option<usize>,
}

impl OutputArgs {
    fn apply(&self, config: &mut Config) {
        config.print_tokens |= self.tokens;
        config.print_ast |= self.ast;
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
    }
}

/// Errors left over after one run, already drained from its diagnostics.
struct Outcome {
    syntax: Vec<SyntaxError>,
    runtime: Vec<RuntimeError>,
}

fn debug(config: &Config, message: &str) {
    if config.debug {
        eprintln!("[debug] {}", message);
    }
}

fn run_source(source: &str, config: &Config, json: bool) -> Result<Outcome, LoxError> {
    let mut diagnostics = Diagnostics::new();
    let result = run(source, config.max_depth, &mut diagnostics);
    debug(
        config,
        &format!(
            "scanned {} tokens, {} syntax errors, {} runtime errors",
            result.tokens.len(),
            diagnostics.syntax_errors().len(),
            diagnostics.runtime_errors().len()
        ),
    );

    let outcome = Outcome {
        syntax: diagnostics.syntax_errors().to_vec(),
        runtime: diagnostics.runtime_errors().to_vec(),
    };

    if json {
        let report = Report::from_run(&result, &mut diagnostics);
        let output = report.to_json().map_err(io::Error::from)?;
        println!("{}", output);
        return Ok(outcome);
    }

    // Nothing from a run with syntax errors is shown.
    if !outcome.syntax.is_empty() {
        return Ok(outcome);
    }

    if config.print_tokens {
        for token in &result.tokens {
            println!("{}", token);
        }
    }

    if config.print_ast {
        if let Some(expr) = &result.expr {
            println!("{}", AstPrinter.print(expr));
        }
    }

    if let Some(value) = &result.value {
        println!("{}", value);
    }

    Ok(outcome)
}

fn check_outcome(source_name: String, outcome: Outcome) -> Result<(), LoxError> {
    if !outcome.syntax.is_empty() {
        return Err(LoxError::Syntax {
            source: source_name,
            errors: outcome.syntax,
        });
    }

    if !outcome.runtime.is_empty() {
        return Err(LoxError::Runtime {
            source: source_name,
            errors: outcome.runtime,
        });
    }

    Ok(())
}

fn read_source(path: &PathBuf) -> Result<String, LoxError> {
    if !path.exists() {
        return Err(LoxError::FileNotFound(format!(
            "Source file not found: {}",
            path.display()
        )));
    }

    fs::read_to_string(path).map_err(LoxError::IO)
}

fn run_file(path: &PathBuf, config: &Config, json: bool) -> Result<(), LoxError> {
    debug(config, &format!("reading {}", path.display()));
    let source = read_source(path)?;
    let outcome = run_source(&source, config, json)?;
    check_outcome(path.display().to_string(), outcome)
}

fn run_prompt(config: &Config, json: bool) -> Result<(), LoxError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", config.prompt);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let outcome = run_source(&line, config, json)?;
        if !outcome.syntax.is_empty() {
            eprintln!("{}", Diagnostics::dump(&outcome.syntax));
        }
        if !outcome.runtime.is_empty() {
            eprintln!("{}", Diagnostics::dump(&outcome.runtime));
        }
    }

    println!();
    Ok(())
}

fn dispatch(cli: Cli) -> Result<(), LoxError> {
    let mut config = Config::load()?;
    debug(
        &config,
        &format!("config path: {}", Config::get_config_path().display()),
    );

    match cli.command {
        Some(Commands::Run { path, output }) => {
            output.apply(&mut config);
            run_file(&path, &config, output.json)?;
        }
        Some(Commands::Eval { source, output }) => {
            output.apply(&mut config);
            let outcome = run_source(&source, &config, output.json)?;
            check_outcome(String::from("<eval>"), outcome)?;
        }
        Some(Commands::Repl { output }) => {
            output.apply(&mut config);
            run_prompt(&config, output.json)?;
        }
        None => {
            run_prompt(&config, false)?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                println!("{}", config.to_json()?);
            }
            ConfigCommands::Init => {
                let config_path = Config::get_config_path();
                if config_path.exists() {
                    println!("Config file already exists at: {}", config_path.display());
                    println!("Remove it to reinitialize.");
                } else {
                    let written = Config::default().save()?;
                    println!("Initialized new config file at: {}", written.display());
                }
            }
            ConfigCommands::Path => {
                println!("{}", Config::get_config_path().display());
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        eprint!("{}", err);
        process::exit(1);
    }
}
