use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive` (e.g.
/// `"cocktail_finder=debug"`). Returns `false` if a global subscriber was
/// already installed, in which case nothing changes.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        info!("logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init_logging("cocktail_finder=debug");
        assert!(!init_logging("cocktail_finder=trace"));
    }
}
