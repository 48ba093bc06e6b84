use powctl::{cli, commands, Config};
use std::process;
use tracing::{error, info};

fn main() {
    let args = cli::parse_args();

    init_logging(&args);

    let mut config = match &args.config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config: {}", e);
                eprintln!("error: {}", e);
                process::exit(2);
            }
        },
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let params = match config.consensus_params() {
        Ok(params) => params,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };
    info!(network = %params.network, "consensus parameters loaded");

    match commands::run(&args.command, &params) {
        Ok(output) => {
            println!("{}", output.text);
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

fn init_logging(args: &cli::Args) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}
