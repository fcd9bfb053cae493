/// interactive menu and one-shot evaluation of formulas from the command line
pub mod cli_main;
