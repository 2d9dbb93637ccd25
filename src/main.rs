//! `duplex` binary: opens the helix window.
//!
//! ```text
//! duplex                          # default options
//! duplex helix.toml               # options from a TOML file
//! duplex --write-defaults PATH    # write the default options and exit
//! ```

use std::path::PathBuf;

use duplex::{DuplexError, Options, Viewer};

enum Command {
    Run(Option<PathBuf>),
    WriteDefaults(PathBuf),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let Some(first) = args.next() else {
        return Ok(Command::Run(None));
    };
    let command = match first.as_str() {
        "--write-defaults" => {
            let path = args
                .next()
                .ok_or_else(|| "--write-defaults needs a path".to_owned())?;
            Command::WriteDefaults(PathBuf::from(path))
        }
        flag if flag.starts_with('-') => {
            return Err(format!("unknown flag: {flag}"));
        }
        path => Command::Run(Some(PathBuf::from(path))),
    };
    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(command)
}

fn run(command: Command) -> Result<(), DuplexError> {
    match command {
        Command::WriteDefaults(path) => {
            Options::default().save(&path)?;
            log::info!("wrote default options to {}", path.display());
            Ok(())
        }
        Command::Run(path) => {
            let options = match path {
                Some(path) => {
                    log::info!("loading options from {}", path.display());
                    Options::load(&path)?
                }
                None => Options::default(),
            };
            Viewer::builder().with_options(options).build().run()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "Usage: duplex [OPTIONS.toml] | duplex --write-defaults PATH"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
