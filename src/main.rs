use alert_replay::corpus::{self, CorpusBuilder};
use alert_replay::{
    kafka::AlertProducer, run_publish, AlertKind, Error, ProducerConfig, PublishOptions, Result,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "alert-replay")]
#[command(about = "Generate synthetic security-alert corpora and replay them to Kafka", long_about = None)]
struct Args {
    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the three alert corpora as JSON files
    Generate {
        #[arg(long, default_value_t = 10_000, help = "Records per alert kind")]
        count: u64,

        #[arg(long, value_name = "DIR", default_value = ".", help = "Output directory")]
        out_dir: PathBuf,

        #[arg(long, help = "Random seed for reproducible corpora")]
        seed: Option<u64>,
    },
    /// Replay persisted corpora to their Kafka topics
    Publish {
        #[arg(long, value_enum, help = "Alert kind to send")]
        kind: Option<AlertKind>,

        #[arg(long, help = "Send all alert kinds")]
        all: bool,

        #[arg(long, default_value = "localhost:9092", help = "Kafka broker address")]
        broker: String,

        #[arg(long, help = "Limit number of messages per kind")]
        limit: Option<usize>,

        #[arg(
            long,
            default_value_t = 0.1,
            value_parser = parse_delay,
            help = "Delay between messages in seconds"
        )]
        delay: f64,

        #[arg(
            long,
            value_name = "DIR",
            default_value = ".",
            help = "Directory containing corpus files"
        )]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    match args.command {
        Command::Generate {
            count,
            out_dir,
            seed,
        } => generate(count, &out_dir, seed).await,
        Command::Publish {
            kind,
            all,
            broker,
            limit,
            delay,
            data_dir,
        } => {
            let kinds = match (kind, all) {
                (_, true) => AlertKind::all().to_vec(),
                (Some(kind), false) => vec![kind],
                (None, false) => {
                    return Err(Error::Config(
                        "either --kind or --all must be specified".to_string(),
                    ));
                }
            };

            let opts = PublishOptions {
                kinds,
                limit,
                delay: Duration::from_secs_f64(delay),
                data_dir,
            };
            publish(&broker, opts).await
        }
    }
}

async fn generate(count: u64, out_dir: &Path, seed: Option<u64>) -> Result<()> {
    info!("Generating {} records per kind into {:?}", count, out_dir);

    let mut builder = CorpusBuilder::new(seed);
    for kind in AlertKind::all() {
        let records = builder.build(kind, count);
        let path = corpus::corpus_path(out_dir, kind);
        corpus::write_corpus(&path, &records).await?;
    }

    info!("All corpora generated: {} records total", count * 3);
    Ok(())
}

async fn publish(broker: &str, opts: PublishOptions) -> Result<()> {
    let producer = AlertProducer::connect(broker, &ProducerConfig::default())?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the in-flight send");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    }

    let result = run_publish(&opts, &producer, &shutdown).await;

    // Flush even when the run failed partway through.
    if let Err(e) = producer.close() {
        warn!("Failed to flush producer on close: {}", e);
    }

    result.map(|_| ())
}

/// `Duration::from_secs_f64` panics on negative or non-finite input, so the
/// delay is rejected at argument-parse time instead.
fn parse_delay(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("invalid delay: {e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err("delay must be a non-negative number of seconds".to_string());
    }
    Ok(value)
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("alert_replay=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("alert_replay=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_accepts_non_negative_seconds() {
        assert_eq!(parse_delay("0.1"), Ok(0.1));
        assert_eq!(parse_delay("0"), Ok(0.0));
        assert_eq!(parse_delay("2.5"), Ok(2.5));
    }

    #[test]
    fn test_delay_rejects_negative_and_non_finite_values() {
        assert!(parse_delay("-0.1").is_err());
        assert!(parse_delay("-5").is_err());
        assert!(parse_delay("NaN").is_err());
        assert!(parse_delay("inf").is_err());
        assert!(parse_delay("abc").is_err());
    }
}
