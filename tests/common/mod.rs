#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use translate_backend::llm::{GenerationBackend, GenerationParams};

/// Backend that replays scripted answers and records what it was asked
#[derive(Default)]
pub struct ScriptedBackend {
    answers: Mutex<VecDeque<Result<String, String>>>,
    pub calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl ScriptedBackend {
    pub fn new<I, S>(answers: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().map(|a| Ok(a.into())).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(VecDeque::from([Err(message.to_string())])),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, anyhow::Error> {
        self.calls.lock().unwrap().push((prompt.to_string(), params.clone()));
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(answer)) => Ok(answer),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("no scripted answer left")),
        }
    }
}
