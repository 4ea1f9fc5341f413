//! CLI entry point: `flut <FILE>` lexes, parses, tree-walks and prints the
//! resulting variable store. `flut --vm <PROGRAM_FILE>` loads a flat byte
//! file and single-steps the register VM directly.

use std::env;
use std::fs;
use std::process::ExitCode;

use flut::interpreter::{Interpreter, Value};
use flut::lexer::{debug_print, lex};
use flut::vm::{vm_step, VmError, VmState};

fn usage(exec_name: &str) {
    eprintln!("Gebruik: {} [BESTAND]", exec_name);
}

fn run_vm(path: &str) -> ExitCode {
    let mem = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => {
            eprintln!("Kan bestand niet openen");
            return ExitCode::FAILURE;
        }
    };

    let mut state = VmState::new(mem);
    loop {
        match vm_step(&mut state) {
            VmError::None => continue,
            VmError::Exit => {
                println!("VM_ERR_EXIT exit_code={}", state.exit_code);
                return ExitCode::SUCCESS;
            }
            VmError::EndOfMem => {
                println!("VM_ERR_END_OF_MEM");
                return ExitCode::SUCCESS;
            }
            VmError::IllegalInst => {
                println!("VM_ERR_ILLEGAL_INST");
                return ExitCode::FAILURE;
            }
        }
    }
}

fn run_script(path: &str) -> ExitCode {
    let source = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => {
            eprintln!("Kan bestand niet openen");
            return ExitCode::FAILURE;
        }
    };

    let tokens = lex(&source);
    debug_print(&tokens);

    let program = flut::grammar::parse(&tokens);
    if let Err(e) = program.print() {
        eprintln!("kon boom niet printen: {}", e);
    }

    let mut interpreter = Interpreter::new();
    interpreter.run(program.statements());

    println!("VARS:");
    for (name, value) in interpreter.store.iter() {
        println!("{}", name);
        match value {
            Value::Number(n) => println!("\t{}", n),
            Value::Str(s) => println!("\t{}", s),
        }
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let exec_name = args.first().map(String::as_str).unwrap_or("flut");

    match args.get(1).map(String::as_str) {
        None => {
            eprintln!("Geen bestand opgegeven");
            usage(exec_name);
            ExitCode::FAILURE
        }
        Some("--vm") => match args.get(2) {
            Some(path) => run_vm(path),
            None => {
                eprintln!("Geen bestand opgegeven");
                usage(exec_name);
                ExitCode::FAILURE
            }
        },
        Some(path) => run_script(path),
    }
}
