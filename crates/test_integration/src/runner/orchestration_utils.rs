use color_eyre::Result;
use colored::*;
use std::future::Future;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! run_test {
    ($call:expr) => {
        $crate::runner::orchestration_utils::run_test_impl(stringify!($call), $call)
    };
}

/// Runs the listed tests in order against one shared context.
/// Every test runs even after a failure; the suite fails at the end naming the failed tests.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:ident),* $(,)? ]) => {
        {
            let mut report = $crate::runner::orchestration_utils::SuiteReport::new();
            $(
                let outcome = run_test!($test_fn($context)).await;
                report.record(stringify!($test_fn), outcome.is_ok());
            )*
            report.finish()?;
        }
    };
}

/// Pass/fail bookkeeping for one suite run.
pub struct SuiteReport {
    started: Instant,
    passed: usize,
    failed: Vec<&'static str>,
}

impl SuiteReport {
    #[must_use]
    pub fn new() -> Self {
        println!();
        Self {
            started: Instant::now(),
            passed: 0,
            failed: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &'static str, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed.push(name);
        }
    }

    pub fn finish(self) -> Result<()> {
        let total = self.passed + self.failed.len();
        println!("{}", "─".repeat(60).truecolor(80, 80, 80));
        println!(
            "{} {}/{} tests passed in {:.2?}.",
            " SUMMARY ".on_purple().black().bold(),
            self.passed,
            total,
            self.started.elapsed()
        );
        println!("{}", "─".repeat(60).truecolor(80, 80, 80));

        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(color_eyre::eyre::eyre!(
                "{} integration test(s) failed: {}",
                self.failed.len(),
                self.failed.join(", ")
            ))
        }
    }
}

pub async fn run_test_impl<Fut>(raw_name: &str, test: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    let name_no_args = raw_name.split('(').next().unwrap_or(raw_name);
    let pretty_name = name_no_args
        .split("::")
        .last()
        .unwrap_or(name_no_args)
        .trim();

    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!(
        "{} {}",
        " RUNNING ".on_cyan().black().bold(),
        pretty_name.cyan().bold()
    );

    let start_time = Instant::now();
    let result = test.await;
    let elapsed = start_time.elapsed();

    match &result {
        Ok(()) => println!(
            "{} {} ({:.2?})",
            " PASSED ".on_green().black().bold(),
            pretty_name.green(),
            elapsed
        ),
        Err(e) => {
            println!(
                "{} {} ({:.2?})",
                " FAILED ".on_red().black().bold(),
                pretty_name.red(),
                elapsed
            );
            println!("\n{e:?}");
        }
    }

    result
}

pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,sqlx=warn,api=debug,hyper=error,reqwest=error".into());

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .finish();

    // Only the first call in a process installs the hooks.
    let _ = tracing::subscriber::set_global_default(subscriber);
    let _ = color_eyre::install();
}
