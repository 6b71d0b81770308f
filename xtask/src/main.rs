use clap::Parser;

mod app;
mod cli;

fn main() {
    let cli = crate::cli::Cli::parse();
    let code = match crate::app::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = err
                .downcast_ref::<eae_xtask::TaskError>()
                .and_then(eae_xtask::TaskError::hint)
            {
                eprintln!("{hint}");
            }
            eae_xtask::error::exit_code_for(&err)
        }
    };
    std::process::exit(code);
}
