use tracing::Level;

/// Install the stderr subscriber. Repeated calls are ignored.
pub fn init(level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Level::DEBUG);
        init(Level::INFO);
    }
}
