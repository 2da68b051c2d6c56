use clap::Parser;
use ezio::file;
use rill::{compile, ir::executor::Executor};
use std::{io::Write, path::PathBuf};

/// Rill language compiler.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file path.
    #[arg(short, long)]
    input: PathBuf,

    /// IR file path; the IR goes to stdout if empty.
    #[arg(long = "emit-ir")]
    emit_ir_path: Option<PathBuf>,

    /// Execute each top-level expression and print its value.
    #[arg(long)]
    run: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let code = file::read(args.input);
    let functions = compile::from_source(&code);
    if let Some(emit_ir_path) = args.emit_ir_path {
        let mut w = file::writer(emit_ir_path);
        for function in &functions {
            writeln!(w, "{function}").unwrap();
        }
    } else {
        for function in &functions {
            println!("{function}");
        }
    }
    if args.run {
        let mut executor = Executor::new(&functions);
        for function in functions.iter().filter(|it| it.header.name.is_empty()) {
            match executor.run_definition(function, &[]) {
                Ok(value) => println!("=> {value}"),
                Err(error) => eprintln!("=> error: {error}"),
            }
        }
    }
}
