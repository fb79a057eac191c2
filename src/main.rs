//! menu-order - Order from a menu and rank the most liked products

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = menu_order::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
