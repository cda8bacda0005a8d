use std::collections::VecDeque;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::client::{Completion, CompletionProvider, CompletionRequest};
use crate::error::ClientError;
use crate::models::Usage;

pub enum Scripted {
    Reply(Completion),
    Fail(u16, String)
}

/// Provider that replays canned replies in order and records every request.
#[derive(Default)]
pub struct FakeProvider {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CompletionRequest>>
}

impl FakeProvider {

    pub fn new() -> Self {

        Self::default()

    }

    pub fn reply(self, text: &str, usage: Usage) -> Self {

        self.replies.lock().unwrap().push_back(Scripted::Reply(Completion {
            text: text.to_string(),
            usage
        }));
        self

    }

    pub fn fail(self, status: u16, body: &str) -> Self {

        self.replies.lock().unwrap().push_back(Scripted::Fail(status, body.to_string()));
        self

    }

    pub fn requests(&self) -> Vec<CompletionRequest> {

        self.requests.lock().unwrap().clone()

    }

    pub fn calls(&self) -> usize {

        self.requests.lock().unwrap().len()

    }

}

#[async_trait]
impl CompletionProvider for FakeProvider {

    fn model(&self) -> &str {

        "fake-model"

    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError> {

        self.requests.lock().unwrap().push(request);

        match self.replies.lock().unwrap().pop_front() {
            Some(Scripted::Reply(completion)) => Ok(completion),
            Some(Scripted::Fail(status, body)) => Err(ClientError::Status { status, body }),
            None => Err(ClientError::Decode("no scripted reply left".to_string()))
        }

    }

}
