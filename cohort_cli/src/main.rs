use cohort_core::config::{CohortConfig, ReportSettings, RunSettings};
use cohort_core::{
    Description, InProcessUnit, ListeningCollector, ListenerFactory, LogListenerFactory,
    NameFilter, NoCoverage, NoSources, RecordingCollector, TestGroup, TestUnit,
};

use clap::Parser;
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(short, long, value_parser)]
    config_file: Option<PathBuf>,
    /// Keep only units whose name or suite contains this fragment.
    #[clap(short, long)]
    filter: Option<String>,
    /// Stop the run after the first failing unit.
    #[clap(long)]
    stop_on_failure: bool,
}

/// Environment the demo units run against, passed opaquely through the group.
struct DemoEnv {
    seed_words: Vec<String>,
    limit: u64,
}

fn demo_env(ctx: &dyn Any) -> &DemoEnv {
    ctx.downcast_ref::<DemoEnv>()
        .expect("demo units run against a DemoEnv")
}

fn demo_suite() -> Vec<Arc<dyn TestUnit>> {
    vec![
        Arc::new(InProcessUnit::new(
            Description::new("limit_is_positive", "arith", None),
            |ctx| {
                let env = demo_env(ctx);
                assert!(env.limit > 0, "demo limit must be positive");
            },
        )),
        Arc::new(InProcessUnit::new(
            Description::new("doubling_stays_below_limit", "arith", None),
            |ctx| {
                let env = demo_env(ctx);
                let doubled = env.seed_words.len() as u64 * 2;
                assert!(doubled < env.limit, "doubled word count exceeds limit");
            },
        )),
        Arc::new(InProcessUnit::new(
            Description::new("seed_words_present", "words", None),
            |ctx| {
                let env = demo_env(ctx);
                assert!(!env.seed_words.is_empty(), "demo needs seed words");
            },
        )),
        Arc::new(InProcessUnit::new(
            Description::new("seed_words_are_lowercase", "words", None),
            |ctx| {
                let env = demo_env(ctx);
                for word in &env.seed_words {
                    assert_eq!(word.to_lowercase(), *word, "seed word not lowercase");
                }
            },
        )),
    ]
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn main() -> Result<(), anyhow::Error> {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config_file {
        Some(config_path) => {
            tracing::info!(path = ?config_path, "loading configuration from specified path");
            CohortConfig::load_from_file(&config_path)?
        }
        None => {
            // No config file specified via CLI, fall back to the default path.
            let default_config_path = PathBuf::from("config.toml");
            if default_config_path.exists() {
                tracing::info!(path = ?default_config_path, "loading default configuration file");
                CohortConfig::load_from_file(&default_config_path)?
            } else {
                tracing::info!("no config file found, using built-in defaults");
                CohortConfig::default()
            }
        }
    };

    let mut run = config.run.unwrap_or_else(RunSettings::default);
    if cli.stop_on_failure {
        run.stop_on_failure = true;
    }
    if let Some(fragment) = cli.filter {
        run.filter = Some(fragment);
    }
    let report = config.report.unwrap_or_else(ReportSettings::default);

    let suite: Arc<dyn TestUnit> = Arc::new(
        TestGroup::new(demo_suite()).map_err(|e| anyhow::anyhow!("demo suite is broken: {e}"))?,
    );

    let suite = match &run.filter {
        Some(fragment) => match suite.filter(&NameFilter::new(fragment.clone())) {
            Some(kept) => kept,
            None => {
                println!("No units match filter '{fragment}', nothing to run.");
                return Ok(());
            }
        },
        None => suite,
    };

    let recording = if run.stop_on_failure {
        RecordingCollector::stopping_on_failure()
    } else {
        RecordingCollector::new()
    };
    let listener = LogListenerFactory.create_listener(
        &NoCoverage,
        &report.output_dir,
        SystemTime::now(),
        &NoSources,
    );
    let mut collector = ListeningCollector::new(recording, listener);

    let env = DemoEnv {
        seed_words: vec!["cohort".to_string(), "suite".to_string(), "unit".to_string()],
        limit: 64,
    };
    suite.execute(&env, &mut collector)?;

    let recording = collector.finish();
    let passed = recording.passed();
    let failed = recording.failed();
    println!("{} passed, {} failed, {} total", passed, failed, passed + failed);

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
