//! 실행 환경(CI 환경변수, 프롬프트 테이블 JSON)에서 설정을 로딩하는 모듈.
//! 모든 로더는 환경변수 조회 함수를 인자로 받아 프로세스 환경 없이도 테스트할 수 있다.

mod env;
mod prompts;

pub use env::{load_action_config, load_fallback_github, process_env};
pub use prompts::load_prompt_table;
