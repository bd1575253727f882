use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub fn setup_logging(level: Level) {
    // Create a subscriber that logs to stdout
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    // a subscriber may already be installed (tests embedding the app)
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Tracing subscriber already set: {}", e);
    }
}
