use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "transcode_mp4=info,ffmpeg=info";
const VERBOSE_FILTER: &str = "transcode_mp4=debug,ffmpeg=debug";

/// Respects `RUST_LOG` when set. Logs go to stderr so stdout only carries
/// usage and result messages.
pub fn init(verbose: bool) {
    let env_filter = filter_directives(std::env::var("RUST_LOG").ok(), verbose);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// An empty `RUST_LOG` counts as unset.
fn filter_directives(from_env: Option<String>, verbose: bool) -> String {
    from_env
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| default_filter(verbose).to_string())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
