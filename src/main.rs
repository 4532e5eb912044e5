use std::process::ExitCode;

use block_ngin::Config;

fn main() -> ExitCode {
    match block_ngin::run(Config::default()) {
        Ok(stats) => {
            log::debug!("{:?}", stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
