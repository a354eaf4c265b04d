use std::{
    collections::HashSet,
    fs, io,
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use thiserror::Error;

use brainforge::{
    bytecode::bytecode::{resolve_jumps, to_bytecode},
    interpreter::{
        ast_interpreter::AstInterpreter, bytecode_interpreter::ByteCodeInterpreter, Runtime,
    },
    lexer::lexer::Lexer,
    parse, BracketError, ParseError, RuntimeError, DEFAULT_TAPE_SIZE, MAX_PROGRAM_SIZE,
};

/// Tape-language compiler front end and interpreter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    /// Stages to dump or run; defaults to run-ast
    #[arg(value_enum)]
    commands: Vec<Command>,

    /// Number of cells on the tape
    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Command {
    /// Print the token stream
    Tokens,
    /// Print the ast
    Ast,
    /// Print the resolved bytecode
    Bytecode,

    /// Run the tree-walking interpreter
    RunAst,
    /// Run the bytecode interpreter
    RunBytecode,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read file: {0}")]
    FileIO(#[from] io::Error),

    #[error("program too large (max {limit} bytes)")]
    ProgramTooLarge { limit: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Brackets(#[from] BracketError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Parse(_) | CliError::Brackets(_) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{0:}: {1:}", "Error".red(), err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let commands: HashSet<Command> = if args.commands.is_empty() {
        HashSet::from([Command::RunAst])
    } else {
        HashSet::from_iter(args.commands.into_iter())
    };

    println!("Running {}", args.file);

    let source = fs::read(&args.file)?;
    if source.len() > MAX_PROGRAM_SIZE {
        return Err(CliError::ProgramTooLarge {
            limit: MAX_PROGRAM_SIZE,
        });
    }

    if commands.contains(&Command::Tokens) {
        for token in Lexer::new(&source) {
            println!("  [{}] {:?}", token.position, token.kind);
        }
    }

    println!("{}", "Starting parsing".blue());
    let now = Instant::now();
    let program = parse(&source)?;
    println!("{} {:.2?}", "Finished parsing in".green(), now.elapsed());

    if commands.contains(&Command::Ast) {
        print!("{program}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runtime = Runtime::new(args.tape_size, stdin, stdout);

    if commands.contains(&Command::RunAst) {
        println!("{}", "Starting ast-interpreter".blue());
        let now = Instant::now();
        AstInterpreter::new().interpret(&mut runtime, &program)?;
        runtime.reset();
        println!();
        println!(
            "{} {:.2?}",
            "Finished ast-interpreter in".green(),
            now.elapsed()
        );
    }

    if commands.contains(&Command::Bytecode) || commands.contains(&Command::RunBytecode) {
        println!("{}", "Starting bytecode".blue());
        let now = Instant::now();
        let mut instructions = to_bytecode(&program);
        resolve_jumps(&mut instructions)?;
        println!(
            "{} {} in {:.2?}",
            "Finished bytecode conversion with length".green(),
            instructions.len(),
            now.elapsed()
        );

        if commands.contains(&Command::Bytecode) {
            for (index, instruction) in instructions.iter().enumerate() {
                println!("  [{index}] {instruction:?}");
            }
        }

        if commands.contains(&Command::RunBytecode) {
            println!("{}", "Starting bytecode-interpreter".blue());
            let now = Instant::now();
            ByteCodeInterpreter::new().run(&mut runtime, &instructions)?;
            runtime.reset();
            println!();
            println!(
                "{} {:.2?}",
                "Finished bytecode-interpreter in".green(),
                now.elapsed()
            );
        }
    }

    Ok(())
}
