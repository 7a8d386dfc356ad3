use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use planner_core::model::{PlannerSettings, PlannerSettingsDraft};
use services::{AppServices, Clock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--auth-delay-ms <ms>] [--quote-interval-secs <s>] [--revisions-due <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --auth-delay-ms 1000");
    eprintln!("  --quote-interval-secs 30");
    eprintln!("  --revisions-due 3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLANNER_AUTH_DELAY_MS, PLANNER_QUOTE_INTERVAL_SECS, PLANNER_REVISIONS_DUE, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(PlannerSettingsDraft),
    Help,
}

/// Environment values first, then flags on top.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut draft = PlannerSettingsDraft {
        auth_delay_ms: env("PLANNER_AUTH_DELAY_MS"),
        quote_interval_secs: env("PLANNER_QUOTE_INTERVAL_SECS"),
        revisions_due: env("PLANNER_REVISIONS_DUE"),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--auth-delay-ms" => {
                draft.auth_delay_ms = Some(require_value(args, "--auth-delay-ms")?);
            }
            "--quote-interval-secs" => {
                draft.quote_interval_secs = Some(require_value(args, "--quote-interval-secs")?);
            }
            "--revisions-due" => {
                draft.revisions_due = Some(require_value(args, "--revisions-due")?);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(draft))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,services=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let draft = match parse_args(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Parsed::Run(draft)) => draft,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            print_usage();
            return Err(e.into());
        }
    };
    let settings: PlannerSettings = draft.validate()?;

    init_tracing();

    let services = AppServices::new(settings, Clock::default_clock()).await?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some dev setups default the tao window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("StudyPlanner")
            .with_always_on_top(false),
    );

    tracing::info!("launching desktop window");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| (key == "PLANNER_AUTH_DELAY_MS").then(|| "500".to_string());
        let parsed = parse_args(&mut args(&["--auth-delay-ms", "0"]), env).unwrap();
        let Parsed::Run(draft) = parsed else {
            panic!("expected run");
        };
        let settings = draft.validate().unwrap();
        assert!(settings.auth_delay().is_zero());
    }

    #[test]
    fn environment_feeds_the_draft() {
        let env = |key: &str| (key == "PLANNER_QUOTE_INTERVAL_SECS").then(|| "5".to_string());
        let Parsed::Run(draft) = parse_args(&mut args(&[]), env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(draft.validate().unwrap().quote_interval().as_secs(), 5);
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert_eq!(
            parse_args(&mut args(&["--db", "x"]), no_env),
            Err(ArgsError::UnknownArg("--db".into()))
        );
        assert_eq!(
            parse_args(&mut args(&["--revisions-due"]), no_env),
            Err(ArgsError::MissingValue {
                flag: "--revisions-due"
            })
        );
        assert_eq!(parse_args(&mut args(&["-h"]), no_env), Ok(Parsed::Help));
    }
}
