#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use bootstrap::AppConfig;

fn main() {
    bootstrap::init_logging();

    if let Err(error) = bootstrap::run(AppConfig::from_env()) {
        tracing::error!(error = %error, "Report generation failed");
        std::process::exit(1);
    }
}
