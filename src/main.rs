use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout = io::stdout();
    let code = oathuri::main_with(std::env::args_os(), &mut stdout.lock());
    ExitCode::from(code)
}
