use crate::image::transformer::SubpixelMode;
use crate::{Arguments, Direction};
use clap::{
    arg, builder::RangedU64ValueParser, crate_description, crate_name, crate_version,
    value_parser, Arg, ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

const TO_PIXEL_LEGACY_FLAG: &str = "-2px";
const TO_PIXEL_FLAG: &str = "--to-pixel";
const HELP_FLAG: &str = "--help";
const HELP_FLAGS: [&str; 2] = ["-h", HELP_FLAG];

/// Option names which are accepted regardless of their case.
const CASE_INSENSITIVE_FLAGS: [&str; 11] = [
    "-i",
    "--input",
    "-o",
    "--output",
    TO_PIXEL_LEGACY_FLAG,
    TO_PIXEL_FLAG,
    "--show-colors",
    "-t",
    "--threads",
    "-h",
    HELP_FLAG,
];

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Result<Arguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let arguments = itr
            .into_iter()
            .map(Into::into)
            .map(normalize_argument)
            .collect::<Vec<OsString>>();
        if requests_help(&arguments) {
            self.display_help(&arguments)?;
        }
        let matches = self.command.try_get_matches_from_mut(arguments)?;
        let arguments = Self::extract_arguments(&matches);
        if arguments.direction == Direction::ToPixel
            && arguments.subpixel_mode == SubpixelMode::Color
        {
            log::warn!("--show-colors only applies to subpixel expansion and is ignored");
        }
        Ok(arguments)
    }

    /// Help wins over every other argument, even malformed ones.
    fn display_help(&mut self, arguments: &[OsString]) -> Result<(), clap::Error> {
        let program_name = arguments
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from(crate_name!()));
        self.command.try_get_matches_from_mut([program_name, OsString::from(HELP_FLAG)])?;
        Ok(())
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_to_pixel_argument(command);
        let command = Self::register_show_colors_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_to_pixel_argument(command: Command) -> Command {
        command.arg(Self::create_to_pixel_argument())
    }

    fn register_show_colors_argument(command: Command) -> Command {
        command.arg(Self::create_show_colors_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        arg!(input_file: -i --input <INPUT_FILE> "Input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output <OUTPUT_FILE> "Output file, its extension selects the image format")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_to_pixel_argument() -> Arg {
        Arg::new("to_pixel")
            .long("to-pixel")
            .help("Treats input as subpixel data, converting 3 pixels into 1 (also: -2px)")
            .action(ArgAction::SetTrue)
    }

    fn create_show_colors_argument() -> Arg {
        Arg::new("show_colors")
            .long("show-colors")
            .help("Show subpixel colors instead of grayscale, only applies without --to-pixel")
            .action(ArgAction::SetTrue)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            direction: Self::extract_to_pixel_argument(matches),
            subpixel_mode: Self::extract_show_colors_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_to_pixel_argument(matches: &ArgMatches) -> Direction {
        if matches.get_flag("to_pixel") {
            Direction::ToPixel
        } else {
            Direction::ToSubpixel
        }
    }

    fn extract_show_colors_argument(matches: &ArgMatches) -> SubpixelMode {
        if matches.get_flag("show_colors") {
            SubpixelMode::Color
        } else {
            SubpixelMode::Grayscale
        }
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

fn requests_help(arguments: &[OsString]) -> bool {
    arguments
        .iter()
        .skip(1)
        .any(|argument| HELP_FLAGS.iter().any(|flag| argument == flag))
}

fn normalize_argument(argument: OsString) -> OsString {
    let Some(lowercase) = argument.to_str().map(str::to_lowercase) else {
        return argument;
    };
    if !CASE_INSENSITIVE_FLAGS.contains(&lowercase.as_str()) {
        return argument;
    }
    if lowercase == TO_PIXEL_LEGACY_FLAG {
        return OsString::from(TO_PIXEL_FLAG);
    }
    OsString::from(lowercase)
}
