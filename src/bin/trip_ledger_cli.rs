use trip_ledger::{
    cli::{core::CliError, run_cli},
    init,
};

fn main() {
    init();

    match run_cli() {
        Ok(()) => {}
        Err(CliError::CommandFailed) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
