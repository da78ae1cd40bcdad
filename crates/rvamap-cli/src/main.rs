#![allow(missing_docs)]
#![allow(clippy::print_stderr)]

use rvamap_cli::CliOpts;

use tracing_subscriber::EnvFilter;

fn main() {
    let cli = CliOpts::parse_from_cmdline();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_env_var("RVAMAP_LOG")
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = evaluate_lookup(cli) {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn evaluate_lookup(cli: CliOpts) -> miette::Result<()> {
    let config = rvamap_cli::load_config()?;

    let dumper = config.dumper.to_dumper();

    rvamap_cli::evaluate_lookup(
        &cli.dll_path,
        cli.virtual_addr,
        cli.base_addr,
        &dumper,
        std::io::stdout().lock(),
    )
}
