use blitview::Viewer;
use blitview_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = Viewer::new().title("blitview").run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
