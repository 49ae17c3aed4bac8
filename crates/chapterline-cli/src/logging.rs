use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "chapterline=debug,chapterline_core=debug,warn"
    } else {
        "chapterline=info,chapterline_core=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
