use super::cli_examples::examples_menu;
use crate::Stoichiometry::balancer::balance;
use crate::Stoichiometry::formula_parser::{calculate_molar_mass, parse_formula_reduced};
use crate::settings::{BalancerConfig, init_settings, with_config};
use clap::{ArgAction, Parser};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, Write};

/// What the command line asked for
#[derive(Parser, Debug, Clone, PartialEq, Default)]
#[command(name = "rebalance", version)]
#[command(about = "Balances chemical equations such as \"CH4 + O2 = CO2 + H2O\"")]
pub struct CliOptions {
    /// Log more (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,

    /// Print the element x species matrix of every balanced equation
    #[arg(short = 'm', long = "matrix")]
    pub show_matrix: bool,

    /// Configuration file (default rebalance_config.json)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<String>,

    /// Equations to balance; without any the interactive menu starts
    #[arg(value_name = "EQUATION")]
    pub equations: Vec<String>,
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, clap::Error> {
    CliOptions::try_parse_from(std::iter::once("rebalance".to_string()).chain(args))
}

pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // a second initialisation only fails because a logger is already set
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

/// Balanced equation or "Error: ..." line, ready to print
pub fn balance_and_report(equation: &str, config: &BalancerConfig) -> String {
    match balance(equation, config) {
        Ok(balanced) => balanced.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

/// Entry point of the binary; returns the process exit code.
pub fn run(options: CliOptions) -> i32 {
    init_logger(options.verbosity);
    if let Some(file) = &options.config_file {
        init_settings(file);
    }
    if options.equations.is_empty() {
        run_interactive_menu();
        return 0;
    }
    let config = with_config(|config| config.clone());
    let mut failures = 0;
    for equation in &options.equations {
        match balance(equation, &config) {
            Ok(balanced) => {
                println!("{}", balanced);
                if options.show_matrix {
                    balanced.pretty_print();
                }
            }
            Err(e) => {
                println!("Error: {}", e);
                failures += 1;
            }
        }
    }
    if failures == 0 { 0 } else { 1 }
}

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_prompt(),
            "2" => formula_prompt(),
            "3" => examples_menu(),
            "0" | "" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options (1, 2, 0)

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!("\x1b[34m\n Balance chemical reactions using linear algebra \n\x1b[0m");
    println!("\x1b[33m1. Balance a reaction\x1b[0m");
    println!("\x1b[33m2. Parse a chemical formula\x1b[0m");
    println!("\x1b[33m3. Sample reactions\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn balance_prompt() {
    print!("Enter a chemical reaction (e.g. CH4 + O2 = CO2 + H2O): ");
    let _ = io::stdout().flush();
    let equation = get_user_input();
    let equation = equation.trim();
    if equation.is_empty() {
        return;
    }
    let config = with_config(|config| config.clone());
    match balance(equation, &config) {
        Ok(balanced) => {
            println!("The chemical reaction is:\n{}", balanced);
            balanced.pretty_print();
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn formula_prompt() {
    print!("Enter a chemical formula (e.g. Ca(OH)2): ");
    let _ = io::stdout().flush();
    let formula = get_user_input();
    let formula = formula.trim();
    match calculate_molar_mass(formula) {
        Ok((molar_mass, composition)) => {
            println!("Element counts: {}", composition);
            if let Ok(reduced) = parse_formula_reduced(formula) {
                println!("Reduced: {}", reduced);
            }
            println!("Molar mass: {:.3} g/mol", molar_mass);
        }
        Err(e) => println!("Error: {}", e),
    }
}

/// one line from stdin; empty on end of input or read error
pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["-vv", "--matrix", "O2 + H2 = H2O"])).unwrap();
        assert_eq!(options.verbosity, 2);
        assert!(options.show_matrix);
        assert_eq!(options.equations, vec!["O2 + H2 = H2O"]);

        let options = parse_args(args(&["-c", "my.json"])).unwrap();
        assert_eq!(options.config_file.as_deref(), Some("my.json"));
        assert!(options.equations.is_empty());

        let options = parse_args(args(&["-v", "-m", "CH4 + O2 = CO2 + H2O", "Na + Cl2 = NaCl"]));
        let options = options.unwrap();
        assert_eq!(options.verbosity, 1);
        assert_eq!(options.equations.len(), 2);

        assert_eq!(parse_args(args(&[])).unwrap(), CliOptions::default());
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_balance_and_report() {
        let config = BalancerConfig::default();
        assert_eq!(
            balance_and_report("O2 + H2 = H2O", &config),
            "O2 + 2·H2 = 2·H2O"
        );
        assert!(balance_and_report("H2O + NO2 = HNO3", &config).starts_with("Error: "));
    }
}
