use clap::Parser;
use rpm_scripts::events::{EventSink, NullSink};
use rpm_scripts::{batch, config, output};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rpm-scripts")]
#[command(about = "Expand #include directives in RPM scriptlet sources")]
#[command(long_about = "\
Expand #include directives in RPM scriptlet sources

Every line that starts with `#include <NAME>` is replaced by the contents of
INCLUDES_DIR/NAME. Each SRC is written to DEST_DIR under its own file name.

  includes/create-user.inc     useradd -r myapp
  src/postinst.sh              #!/bin/sh
                               #include <create-user.inc>
                               systemctl daemon-reload

  $ rpm-scripts includes build/SCRIPTS src/postinst.sh

  build/SCRIPTS/postinst.sh    #!/bin/sh
                               useradd -r myapp
                               systemctl daemon-reload

Included fragments are not scanned for further directives. A SRC that does
not exist produces an empty file in DEST_DIR. A missing fragment is an error.

Run 'rpm-scripts --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Directory holding the include fragments
    #[arg(required_unless_present = "gen_config")]
    includes_dir: Option<PathBuf>,

    /// Output directory (created if absent)
    #[arg(required_unless_present = "gen_config")]
    dest_dir: Option<PathBuf>,

    /// Source files to expand, processed in order
    #[arg(required_unless_present = "gen_config")]
    sources: Vec<PathBuf>,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Write a JSON report of the generated files
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long, exclusive = true)]
    gen_config: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut cause = e.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut settings = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::ExpandConfig::default(),
    };
    settings.diagnostics.quiet |= cli.quiet;

    let invocation = batch::Invocation::from_args(
        cli.includes_dir
            .into_iter()
            .chain(cli.dest_dir)
            .chain(cli.sources),
    )?;

    let quiet = settings.diagnostics.quiet;
    let sink: &dyn EventSink = if quiet {
        &NullSink
    } else {
        &output::StdoutSink
    };
    let report = batch::run(&invocation, &settings, &sink)?;

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
    }
    if !quiet {
        output::print_summary(&report);
    }

    Ok(())
}
