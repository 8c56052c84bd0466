use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(name = "enescript", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: EneCommand,
    /// Raise the log level; repeat for more detail.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum EneCommand {
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ProgramFormat,
    },
    Run {
        path: PathBuf,
        /// Log actions instead of performing them.
        #[clap(long)]
        dry_run: bool,
        /// Prefix every dialogue line with `【NAME】`.
        #[clap(long)]
        speaker: Option<String>,
        /// Render syntax errors as annotated source reports.
        #[clap(long)]
        pretty_errors: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

fn main() -> ExitCode {
    match enescript_main() {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

fn enescript_main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = CLArgs::parse();
    init_logger(args.verbose);

    let succeeded = match args.routine {
        EneCommand::Tokenize { path, format } => {
            log::info!("Tokenizing {:?}...", path);
            let src = read_to_string(&path)?;
            tokenize(&src, &path, &format)
        }
        EneCommand::Parse { path, format } => {
            log::info!("Parsing {:?}...", path);
            let src = read_to_string(&path)?;
            parse(&src, &path, &format)
        }
        EneCommand::Run {
            path,
            dry_run,
            speaker,
            pretty_errors,
        } => {
            log::info!("Running {:?}...", path);
            let src = read_to_string(&path)?;
            run(&src, &path, dry_run, speaker.as_deref(), pretty_errors)
        }
    };

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(65))
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn tokenize(src: &str, path: &Path, format: &TokenFormat) -> bool {
    use enescript::lexer::formatter::{
        BasicFormatter, DebugFormatter, ToFormatter, TokenFormatter,
    };
    use enescript::lexer::{Lexer, TokenKind};

    let mut scanner = Lexer::new(src, path);
    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&scanner)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&scanner)),
    };
    let mut succeeded = true;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    return succeeded;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                succeeded = false;
            }
        };
    }
}

fn parse(src: &str, path: &Path, format: &ProgramFormat) -> bool {
    use enescript::parser::formatter::{
        BasicParserFormatter, DebugFormatter, ParserFormatter, ProgramFormatter,
        SExpressionFormatter, ToFormatter,
    };
    use enescript::parser::Parser;

    let mut parser = Parser::new(src, path);
    let error_formatter: BasicParserFormatter = parser.create_formatter();
    let formatter: Box<dyn ProgramFormatter> = match format {
        ProgramFormat::Debug => Box::new(DebugFormatter),
        ProgramFormat::SExpr => Box::new(SExpressionFormatter),
    };
    match parser.parse() {
        Ok(program) => {
            println!("{}", formatter.format(&program));
            true
        }
        Err(error) => {
            eprintln!("{}", error_formatter.format_error(&error));
            false
        }
    }
}

fn run(src: &str, path: &Path, dry_run: bool, speaker: Option<&str>, pretty_errors: bool) -> bool {
    use enescript::interpreter::context::{HostContext, LogDiagnostics, StdoutDialogue};
    use enescript::interpreter::TreeWalkInterpreter;
    use enescript::parser::formatter::{
        BasicParserFormatter, ParserFormatter, PrettyParserFormatter, ToFormatter,
    };
    use enescript::parser::Parser;
    use enescript::system::{DryRunActions, SystemActions, SystemEnvironment};

    let mut parser = Parser::new(src, path);
    let error_formatter: Box<dyn ParserFormatter> = if pretty_errors {
        Box::new(ToFormatter::<PrettyParserFormatter>::create_formatter(&parser))
    } else {
        Box::new(ToFormatter::<BasicParserFormatter>::create_formatter(&parser))
    };
    let program = match parser.parse() {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", error_formatter.format_error(&error));
            return false;
        }
    };

    let dialogue = StdoutDialogue::new(speaker);
    if dry_run {
        let mut context = HostContext::new(dialogue, DryRunActions, SystemEnvironment, LogDiagnostics);
        TreeWalkInterpreter::new(&mut context).execute(&program);
    } else {
        let mut context = HostContext::new(dialogue, SystemActions, SystemEnvironment, LogDiagnostics);
        TreeWalkInterpreter::new(&mut context).execute(&program);
    }
    true
}
