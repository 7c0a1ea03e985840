use ReBalance::cli::cli_main::{parse_args, run};

pub fn main() {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        // prints usage or help, exit code 2 on a bad argument
        Err(e) => e.exit(),
    };
    std::process::exit(run(options));
}
