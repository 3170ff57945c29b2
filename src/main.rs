use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use zipshard::{pipeline, PipelineConfig};

fn main() -> ExitCode {
    // ─── 1) init logging (stderr; stdout carries the shard paths) ─────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) run with the fixed configuration ─────────────────────────
    let cfg = PipelineConfig::default();
    match pipeline::run_with(&cfg, |path| println!("{}", path.display())) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
