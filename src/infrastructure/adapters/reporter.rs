//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// CI 로그에 진행 상황을 찍는 리포터.
/// stdout이 TTY일 때만 프롬프트 상태에 색을 입힌다.
pub struct ConsoleReporter {
    color: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    fn format_status(&self, status: &str) -> String {
        if self.color {
            colorize_status(status)
        } else {
            status.to_string()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        println!("[{:<12}] {}", scope, message);
    }

    fn prompt_status(&self, prompt: &str, status: &str, extra: Option<&str>) {
        let status = self.format_status(status);
        match extra {
            Some(extra) => println!("[prompt:{:<20}] {:<7} {}", prompt, status, extra),
            None => println!("[prompt:{:<20}] {}", prompt, status),
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

fn colorize_status(status: &str) -> String {
    match status {
        "running" => format!("\x1b[33m{status}\x1b[0m"),
        "done" => format!("\x1b[32m{status}\x1b[0m"),
        "error" => format!("\x1b[31m{status}\x1b[0m"),
        _ => status.to_string(),
    }
}
