/// terminal front end: argument handling, logger set-up and the interactive menu
pub mod cli_main;
/// sample reactions shown by the interactive menu
pub mod cli_examples;
