use tracing_subscriber::EnvFilter;

/// Crates whose events `--verbose` turns up to debug.
const VERBOSE_TARGETS: &[&str] = &["dot_lookup", "dot_lookup_infrastructure"];

/// Installs the stderr subscriber.
///
/// The filter comes from `--log-level`, then `--verbose`, then `RUST_LOG`,
/// then the config file.
pub fn init_logging(config_level: &str, cli_level: Option<&str>, verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(config_level, cli_level, env.as_deref(), verbose);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn filter_directives(
    config_level: &str,
    cli_level: Option<&str>,
    env: Option<&str>,
    verbose: bool,
) -> String {
    if let Some(level) = cli_level {
        return level.to_string();
    }
    if verbose {
        let mut directives = config_level.to_string();
        for target in VERBOSE_TARGETS {
            directives.push_str(&format!(",{target}=debug"));
        }
        return directives;
    }
    match env {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => config_level.to_string(),
    }
}
