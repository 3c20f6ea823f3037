use dot_lookup_domain::{CliOverrides, Config};
use tracing::debug;

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;

    debug!(
        port = config.lookup.port,
        connect_timeout_secs = config.lookup.connect_timeout_secs,
        read_timeout_secs = config.lookup.read_timeout_secs,
        aliases = config.servers.len(),
        "Configuration loaded"
    );

    Ok(config)
}
