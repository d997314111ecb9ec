use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG`, when set, wins over the flags.
pub fn setup_logging(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(quiet, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directives(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "page_summarizer=debug,info"
    } else {
        "page_summarizer=info,warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directives(true, true), "error");
        assert_eq!(default_directives(false, true), "page_summarizer=debug,info");
        assert_eq!(default_directives(false, false), "page_summarizer=info,warn");
    }
}
