//! Kaynat entry point: parse CLI arguments, run a file or start the shell.

fn main() -> std::io::Result<()> {
    env_logger::init();
    let code = kaynat::cli::run_cli()?;
    std::process::exit(code);
}
