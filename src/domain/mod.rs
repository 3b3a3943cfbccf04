//! Domain layer
//! 비즈니스 규칙(패치 선택, 프롬프트 테이블, 리뷰 코멘트)을 외부 시스템 없이 표현한다.

pub mod patch;
pub mod policy;
pub mod prompt;
pub mod review;
pub mod target;
pub mod usage;
