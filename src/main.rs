pub mod cli;
pub mod emit;
pub mod error;
pub mod ir;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod value;
pub mod walk;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
