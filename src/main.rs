use std::process::ExitCode;

use setvol::{CoreAudio, command, init_logging};

fn main() -> ExitCode {
    init_logging();
    ExitCode::from(command::run(std::env::args_os(), CoreAudio))
}
