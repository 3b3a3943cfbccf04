//! completion provider 구현 모음.

pub mod openai;

pub use openai::OpenAiProvider;
