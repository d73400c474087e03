use std::env::args_os;
use std::process::ExitCode;

use subpixelizer::{convert_image, CLIParser, Direction};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = match cli_parser.parse(args_os()) {
        Ok(arguments) => arguments,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match convert_image(&arguments) {
        Ok(_) => {
            let message = match arguments.direction() {
                Direction::ToSubpixel => "Decoded subpixel image!",
                Direction::ToPixel => "Encoded pixel image!",
            };
            println!(
                "{}\n  \"{}\" -> \"{}\"",
                message,
                arguments.input_file().display(),
                arguments.output_file().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
