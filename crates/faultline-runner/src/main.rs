use clap::Parser;
use faultline_runner::{execute_run, execute_validate, Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(command) => execute_run(&command),
        Commands::Validate(command) => execute_validate(&command),
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
