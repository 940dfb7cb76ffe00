use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Filter directive: explicit value (PROJ_SCAFFOLD_LOG) wins, else `debug` when verbose,
/// else `warn`.
pub fn filter_directive(explicit: Option<&str>, verbose: bool) -> String {
    match explicit {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        _ if verbose => "proj_scaffold=debug,warn".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the stderr fmt subscriber once; later calls are no-ops.
pub fn init_logging(explicit: Option<&str>, verbose: bool) {
    INIT.get_or_init(|| {
        let directive = filter_directive(explicit, verbose);
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
