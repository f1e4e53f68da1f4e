use clap::Parser;
use tracing_subscriber::EnvFilter;

use pg_gateway::cli::Args;
use pg_gateway::config::GatewayConfig;
use pg_gateway::gateway::Gateway;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = GatewayConfig::resolve(args.config.as_deref(), args.connection())?;
    let gateway = Gateway::new(config.seed, config.timeouts);

    let output = args.command.run(&gateway, args.format)?;
    println!("{}", output);
    Ok(())
}
