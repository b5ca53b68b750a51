use std::process::ExitCode;

use csv_insight::analyze;

fn main() -> ExitCode {
    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: csv-insight <file.csv>");
        return ExitCode::from(2);
    };

    let mut stdout = std::io::stdout().lock();
    match analyze(&path, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
