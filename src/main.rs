use MolMass::cli::cli_main::{run_interactive_menu, run_once};
use MolMass::settings::{DEFAULT_CONFIG_FILE, Settings};
use log::error;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::process::ExitCode;

fn init_logging(settings: &Settings) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        settings.log_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &settings.log_file {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file '{}': {}", log_file, e),
        }
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("logger already initialized: {}", e);
    }
}

/// molmass                       interactive menu
/// molmass <TABLE> <FORMULA>...  molar mass of every formula
fn main() -> ExitCode {
    let settings = match Settings::load(DEFAULT_CONFIG_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&settings);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.split_first() {
        None => run_interactive_menu(&settings).map(|_| true),
        Some((_, [])) => {
            eprintln!("usage: molmass <TABLE> <FORMULA>...");
            return ExitCode::FAILURE;
        }
        Some((table_path, formulas)) => run_once(
            table_path,
            formulas,
            settings.subscript_advance,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        ),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("i/o error: {}", e);
            ExitCode::FAILURE
        }
    }
}
