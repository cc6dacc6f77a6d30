//! Batch evaluation client for a running translation service.
//!
//! Sends every dataset record to `POST /translate`, records latency, and
//! writes hypothesis/reference pairs for an external quality scorer.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::utils::load_text_file_with_guess_encoding;
use crate::translate::{TranslationRequest, TranslationResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:9000/translate";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRecord {
    pub text_data: String,
    pub validated_text: String,
    #[serde(default = "default_source_language_code")]
    pub source_language_code: String,
    #[serde(default = "default_target_language_code")]
    pub target_language_code: String,
}

fn default_source_language_code() -> String {
    "bn".to_string()
}

fn default_target_language_code() -> String {
    "en".to_string()
}

/// Load a JSON array of records, keeping at most `limit` of them
pub fn load_records(path: &Path, limit: Option<usize>) -> Result<Vec<EvalRecord>> {
    let content = load_text_file_with_guess_encoding(path)?;
    let mut records: Vec<EvalRecord> = serde_json::from_str(&content)?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    info!("Loaded {} test samples from {}", records.len(), path.display());
    Ok(records)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_url: String,
}

impl ApiClient {
    pub fn new(api_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Translate one record; returns the translated text and elapsed seconds
    pub async fn translate(&self, record: &EvalRecord) -> Result<(String, f64)> {
        let request = TranslationRequest {
            text: record.text_data.clone(),
            source_language: record.source_language_code.clone(),
            target_language: record.target_language_code.clone(),
        };

        let start = Instant::now();
        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let result: TranslationResponse = response.json().await?;

        Ok((result.translated_text, start.elapsed().as_secs_f64()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

impl TimeStats {
    /// Summary of latency samples; `std` is the sample standard deviation
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let total: f64 = samples.iter().sum();
        let mean = total / n;
        let std = if samples.len() > 1 {
            let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            std,
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalPair {
    pub index: usize,
    pub source: String,
    pub hypothesis: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub generated_at: DateTime<Utc>,
    pub api_url: Option<String>,
    pub total_samples: usize,
    pub successful: usize,
    pub errors: usize,
    pub translation_times: TimeStats,
    pub pairs: Vec<EvalPair>,
}

/// Run every record through `client`; without a client the reference is
/// used as the hypothesis, which exercises the harness end to end.
pub async fn run_evaluation(records: &[EvalRecord], client: Option<&ApiClient>) -> EvalReport {
    let total = records.len();
    let mut pairs = Vec::with_capacity(total);
    let mut times = Vec::new();
    let mut errors = 0;

    info!("Starting evaluation of {} samples", total);

    for (idx, record) in records.iter().enumerate() {
        let hypothesis = match client {
            Some(client) => match client.translate(record).await {
                Ok((text, elapsed)) if !text.trim().is_empty() => {
                    times.push(elapsed);
                    text
                }
                Ok(_) => {
                    warn!(sample = idx + 1, "empty translation returned");
                    errors += 1;
                    continue;
                }
                Err(e) => {
                    warn!(sample = idx + 1, error = %e, "API error");
                    errors += 1;
                    continue;
                }
            },
            None => record.validated_text.clone(),
        };

        pairs.push(EvalPair {
            index: idx,
            source: record.text_data.clone(),
            hypothesis,
            reference: record.validated_text.clone(),
        });

        if idx == 0 || (idx + 1) % 10 == 0 {
            info!("Progress: {}/{}", idx + 1, total);
        }
    }

    EvalReport {
        generated_at: Utc::now(),
        api_url: client.map(|c| c.api_url().to_string()),
        total_samples: total,
        successful: pairs.len(),
        errors,
        translation_times: TimeStats::from_samples(&times),
        pairs,
    }
}

impl EvalReport {
    pub fn success_rate(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.successful as f64 / self.total_samples as f64 * 100.0
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Detailed results saved to {}", path.display());
        Ok(())
    }

    /// Human-readable summary for the terminal
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}\nTRANSLATION EVALUATION RESULTS\n{rule}")?;
        writeln!(f, "  Total samples:     {}", self.total_samples)?;
        writeln!(f, "  Successful:        {}", self.successful)?;
        writeln!(f, "  Errors:            {}", self.errors)?;
        writeln!(f, "  Success rate:      {:.2}%", self.success_rate())?;

        let times = &self.translation_times;
        if times.mean > 0.0 {
            writeln!(f, "  Mean time:         {:.3}s", times.mean)?;
            writeln!(f, "  Std deviation:     {:.3}s", times.std)?;
            writeln!(f, "  Min time:          {:.3}s", times.min)?;
            writeln!(f, "  Max time:          {:.3}s", times.max)?;
            writeln!(f, "  Total time:        {:.2}s", times.total)?;
        }
        f.write_str(&rule)
    }
}
