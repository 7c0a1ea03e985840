use super::cli_main::{balance_and_report, get_user_input};
use crate::settings::with_config;
use std::io::{self, Write};

/// reactions that balance to a unique answer
pub const SAMPLE_REACTIONS: [&str; 5] = [
    "CH4 + O2 = CO2 + H2O",
    "MnS + As2Cr10O35 + H2SO4 = HMnO4 + AsH3 + CrS3O12 + H2O",
    "NaNO3 + Zn + NaOH = Na2ZnO2 + NH3 + H2O",
    "MgSO4 + NaOH = Mg(OH)2 + Na2SO4",
    "K4Fe(CN)6 + KMnO4 + H2SO4 = KHSO4 + Fe2(SO4)3 + MnSO4 + HNO3 + CO2 + H2O",
];

/// reactions that have no solution or more than one
pub const REJECTED_REACTIONS: [&str; 4] = [
    "H2O + NO2 = HNO3",
    "KNO3 + S + C = K2CO3 + K2SO4 + CO2 + N2",
    "P + HNO3 + H2O = H3PO4 + NO + NO2",
    "MnO2 + SO2 = MnS2O6 + MnSO4",
];

pub fn examples_menu() {
    loop {
        println!("\n=== Sample reactions ===");
        println!("1. Balance the sample reactions");
        println!("2. Try the reactions that cannot be balanced");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        let _ = io::stdout().flush();

        let choice = get_user_input();
        match choice.trim() {
            "1" => run_samples(&SAMPLE_REACTIONS),
            "2" => run_samples(&REJECTED_REACTIONS),
            "0" | "" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn run_samples(reactions: &[&str]) {
    let config = with_config(|config| config.clone());
    for reaction in reactions {
        println!("{}  =>  {}", reaction, balance_and_report(reaction, &config));
    }
}
