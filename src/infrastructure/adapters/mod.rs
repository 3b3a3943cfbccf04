//! 애플리케이션 포트를 콘솔/드라이런 구현으로 연결하는 어댑터 계층.

mod dry_run;
mod reporter;

pub use dry_run::DryRunPublisher;
pub use reporter::ConsoleReporter;
