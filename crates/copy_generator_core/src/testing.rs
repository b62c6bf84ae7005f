//! In-memory stand-ins for the ports, shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::GenerationRequest;
use crate::ports::{
    ClipboardService, CopyGenerationService, KeyValueStore, PortError, PortResult,
};

fn clone_reply(reply: &PortResult<String>) -> PortResult<String> {
    match reply {
        Ok(text) => Ok(text.clone()),
        Err(PortError::Rejected(m)) => Err(PortError::Rejected(m.clone())),
        Err(PortError::Transport(m)) => Err(PortError::Transport(m.clone())),
        Err(PortError::Protocol(m)) => Err(PortError::Protocol(m.clone())),
        Err(e) => Err(PortError::Unexpected(e.to_string())),
    }
}

/// Answers every call with a fixed reply and records what it was sent.
pub struct FakeGenerationService {
    reply: Mutex<PortResult<String>>,
    copy_requests: Mutex<Vec<GenerationRequest>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerationService {
    pub fn replying(reply: PortResult<String>) -> Self {
        Self {
            reply: Mutex::new(reply),
            copy_requests: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: PortResult<String>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn copy_requests(&self) -> Vec<GenerationRequest> {
        self.copy_requests.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CopyGenerationService for FakeGenerationService {
    async fn generate_copy(&self, request: &GenerationRequest) -> PortResult<String> {
        self.copy_requests.lock().unwrap().push(request.clone());
        clone_reply(&self.reply.lock().unwrap())
    }

    async fn generate_text(&self, prompt: &str) -> PortResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        clone_reply(&self.reply.lock().unwrap())
    }
}

/// A `HashMap`-backed store that can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        if self.fail_reads {
            return Err(PortError::Storage("read refused".to_string()));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        if self.fail_writes {
            return Err(PortError::Storage("quota exceeded".to_string()));
        }
        *self.writes.lock().unwrap() += 1;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Remembers everything written to it.
#[derive(Default)]
pub struct RecordingClipboard {
    texts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl ClipboardService for RecordingClipboard {
    fn write_text(&self, text: &str) -> PortResult<()> {
        if self.fail {
            return Err(PortError::Unexpected("no display".to_string()));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
