//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

/// 잘못된 사용법일 때의 종료 코드(EX_USAGE).
pub const USAGE_EXIT_CODE: i32 = 64;

#[derive(Debug, Parser)]
#[command(name = "patchpilot")]
#[command(about = "Run LLM prompts against a pull request patch and post the results")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print comments and reviews to stdout, do not post
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log rendered prompts and raw responses
    #[arg(long, global = true)]
    debug: bool,

    /// JSON file with a name -> template prompt table
    #[arg(long, global = true, value_name = "PATH")]
    prompts_file: Option<String>,

    /// Patch size limit in bytes (0 disables the limit)
    #[arg(long, value_name = "N")]
    max_patch_bytes: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the effective prompt table
    Prompts,
}

#[derive(Debug)]
pub enum CliAction {
    InspectPrompts(RunOptions),
    Review(RunOptions),
}

impl CliAction {
    pub fn options(&self) -> &RunOptions {
        match self {
            Self::InspectPrompts(options) | Self::Review(options) => options,
        }
    }
}

impl Cli {
    /// 프로세스 인자를 파싱한다. 도움말/버전 출력도 `Err`로 돌아온다.
    pub fn parse_action() -> Result<CliAction, clap::Error> {
        Self::try_parse().map(Self::into_action)
    }

    fn into_action(self) -> CliAction {
        let options = RunOptions {
            dry_run: self.dry_run,
            debug: self.debug,
            prompts_file: self.prompts_file,
            max_patch_bytes: self.max_patch_bytes,
        };

        match self.command {
            Some(Commands::Prompts) => CliAction::InspectPrompts(options),
            None => CliAction::Review(options),
        }
    }
}
