//! 리뷰 대상 unified diff 값 객체.

use std::fmt;
use std::sync::Arc;

/// 한 번 획득되면 변경되지 않는 diff 바이트열.
/// 여러 프롬프트 작업이 동시에 읽으므로 `Arc`로 공유한다.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Patch {
    bytes: Arc<[u8]>,
}

impl Patch {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            bytes: Arc::from(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 프롬프트 삽입용 텍스트. 잘못된 UTF-8 시퀀스는 대체 문자로 바꾼다.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl fmt::Debug for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch").field("len", &self.len()).finish()
    }
}
