use std::env;
use std::io::{self, Read};
use std::process;

use brace_interpreter::execute;
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Warn).env().init() {
        eprintln!("Error: failed to initialise logging: {}", err);
    }

    let program = match env::args().nth(1) {
        Some(source) => source,
        None => {
            let mut source = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut source) {
                eprintln!("Error: failed to read program from stdin: {}", err);
                process::exit(1);
            }
            source
        }
    };

    match execute(&program) {
        Ok(variables) => {
            println!("Final variables:");
            let mut vars: Vec<_> = variables.iter().collect();
            vars.sort_by_key(|(name, _)| *name);
            for (name, value) in vars {
                println!("  {} = {}", name, value);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
