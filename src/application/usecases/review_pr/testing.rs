//! 유스케이스 테스트용 인메모리 포트 구현.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use crate::application::errors::HttpStatusError;
use crate::application::ports::{
    CommentPoster, CompletionProvider, RefDiffer, Reporter, ReviewSubmitter, WorkspacePatchReader,
};
use crate::domain::patch::Patch;
use crate::domain::review::{Completion, ReviewComment, ReviewEvent};
use crate::domain::target::PullRequestTarget;

pub(crate) fn target() -> PullRequestTarget {
    PullRequestTarget {
        owner: "octo".to_string(),
        repo: "demo".to_string(),
        number: 7,
    }
}

pub(crate) struct StubReader {
    result: Result<String, String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl StubReader {
    pub fn ok(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: Err(msg.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspacePatchReader for StubReader {
    async fn read_patch(&self, path: &Path) -> Result<Patch> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        match &self.result {
            Ok(text) => Ok(Patch::new(text.as_bytes().to_vec())),
            Err(msg) => Err(anyhow!(msg.clone())),
        }
    }
}

pub(crate) struct StubDiffer {
    result: Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubDiffer {
    pub fn ok(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: Err(msg.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RefDiffer for StubDiffer {
    async fn diff(&self, base_ref: &str, head_ref: &str) -> Result<Patch> {
        self.calls
            .lock()
            .unwrap()
            .push((base_ref.to_string(), head_ref.to_string()));
        match &self.result {
            Ok(text) => Ok(Patch::new(text.as_bytes().to_vec())),
            Err(msg) => Err(anyhow!(msg.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    CompletionReturned(String),
    CommentPosted(String),
    ReviewCreated(String),
    ReviewSubmitted(u64),
}

impl Event {
    /// 해당 프롬프트의 결과 게시 이벤트인지.
    pub fn published_for(&self, name: &str) -> bool {
        match self {
            Event::CommentPosted(body) => body.starts_with(&format!("## {name}\n")),
            Event::ReviewCreated(body) => *body == format!("## {name}"),
            _ => false,
        }
    }
}

pub(crate) type EventLog = Arc<Mutex<Vec<Event>>>;

/// 테스트 템플릿은 `<name>:\n%s` 형태라 프롬프트 앞부분으로 이름을 찾는다.
fn prompt_name(prompt: &str) -> String {
    prompt
        .split_once(":\n")
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

pub(crate) struct MockCompletion {
    default: Option<String>,
    choices: HashMap<String, Vec<String>>,
    failures: HashMap<String, String>,
    panics: HashSet<String>,
    prompts: Mutex<Vec<String>>,
    events: EventLog,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self {
            default: None,
            choices: HashMap::new(),
            failures: HashMap::new(),
            panics: HashSet::new(),
            prompts: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_default(mut self, content: &str) -> Self {
        self.default = Some(content.to_string());
        self
    }

    pub fn with_choices(mut self, name: &str, choices: Vec<String>) -> Self {
        self.choices.insert(name.to_string(), choices);
        self
    }

    pub fn with_failure(mut self, name: &str, msg: &str) -> Self {
        self.failures.insert(name.to_string(), msg.to_string());
        self
    }

    pub fn with_panic(mut self, name: &str) -> Self {
        self.panics.insert(name.to_string());
        self
    }

    pub fn events(&self) -> EventLog {
        Arc::clone(&self.events)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        tokio::task::yield_now().await;

        let name = prompt_name(prompt);
        if self.panics.contains(&name) {
            panic!("provider blew up for {name}");
        }

        self.events
            .lock()
            .unwrap()
            .push(Event::CompletionReturned(name.clone()));

        if let Some(msg) = self.failures.get(&name) {
            return Err(anyhow!(msg.clone()));
        }

        let choices = match self.choices.get(&name) {
            Some(choices) => choices.clone(),
            None => self.default.clone().into_iter().collect(),
        };
        Ok(Completion {
            choices,
            token_usage: 10,
        })
    }
}

pub(crate) struct MockGitHub {
    events: EventLog,
    comments: Mutex<Vec<String>>,
    created: Mutex<Vec<(String, Vec<ReviewComment>)>>,
    submitted: Mutex<Vec<(u64, &'static str)>>,
    fail_comments: bool,
    fail_create: bool,
    fail_submit: bool,
}

impl MockGitHub {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            comments: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            fail_comments: false,
            fail_create: false,
            fail_submit: false,
        }
    }

    pub fn fail_comments(mut self) -> Self {
        self.fail_comments = true;
        self
    }

    pub fn fail_create_review(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn fail_submit_review(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }

    pub fn created_reviews(&self) -> Vec<(String, Vec<ReviewComment>)> {
        self.created.lock().unwrap().clone()
    }

    pub fn submitted_reviews(&self) -> Vec<(u64, &'static str)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentPoster for MockGitHub {
    async fn post_comment(&self, _target: &PullRequestTarget, body: &str) -> Result<()> {
        if self.fail_comments {
            return Err(anyhow!("github is down"));
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::CommentPosted(body.to_string()));
        self.comments.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

#[async_trait]
impl ReviewSubmitter for MockGitHub {
    async fn create_review(
        &self,
        _target: &PullRequestTarget,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<u64> {
        if self.fail_create {
            return Err(HttpStatusError {
                service: "github",
                status: 422,
                body: "{\"message\":\"Validation Failed\"}".to_string(),
            })
            .context("github: failed to create review");
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::ReviewCreated(body.to_string()));
        let mut created = self.created.lock().unwrap();
        created.push((body.to_string(), comments.to_vec()));
        Ok(created.len() as u64)
    }

    async fn submit_review(
        &self,
        _target: &PullRequestTarget,
        review_id: u64,
        _body: &str,
        event: ReviewEvent,
    ) -> Result<()> {
        if self.fail_submit {
            return Err(anyhow!("connection closed"));
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::ReviewSubmitted(review_id));
        self.submitted
            .lock()
            .unwrap()
            .push((review_id, event.as_api_str()));
        Ok(())
    }
}

pub(crate) struct SilentReporter;

impl Reporter for SilentReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn prompt_status(&self, _prompt: &str, _status: &str, _extra: Option<&str>) {}
    fn raw(&self, _line: &str) {}
}
