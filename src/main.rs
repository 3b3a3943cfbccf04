//! `patchpilot` 바이너리 진입점.

use std::sync::Arc;

use patchpilot::domain::usage::UsageAccumulator;
use patchpilot::interface::cli::command::USAGE_EXIT_CODE;
use patchpilot::interface::cli::{Cli, CliAction};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(err) => {
            // 도움말/버전 출력은 정상 종료.
            let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(action.options().debug);

    match action {
        CliAction::InspectPrompts(options) => {
            match patchpilot::inspect_prompts_pretty_json(&options) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Review(options) => {
            let usage = Arc::new(UsageAccumulator::new());
            let result = patchpilot::run(options, Arc::clone(&usage)).await;
            println!("Used {} OpenAI tokens", usage.total());

            if let Err(err) = result {
                eprintln!("error: {err}");
                std::process::exit(err.exit_code());
            }
        }
    }
}

/// RUST_LOG가 없으면 DEBUG 환경변수나 --debug에 따라 기본 레벨을 정한다.
fn init_tracing(debug_flag: bool) {
    let debug = debug_flag || std::env::var("DEBUG").is_ok_and(|v| !v.trim().is_empty());
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
