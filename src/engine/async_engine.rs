use crate::classifier::RiskModel;
use crate::engine::reputation::{Reputation, ReputationService};
use crate::storage::Storage;
use crate::types::ScanPayload;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

const OUTPUT_HEADER: [&str; 5] = ["user_id", "risk_percentage", "risk_level", "transactions_analyzed", "message"];

/// One output line.
#[derive(Debug, Serialize)]
pub struct ReputationRow<'a> {
    pub user_id: &'a str,
    pub risk_percentage: f64,
    pub risk_level: &'static str,
    pub transactions_analyzed: usize,
    pub message: &'static str
}

impl<'a> From<&'a Reputation> for ReputationRow<'a> {
    fn from(reputation: &'a Reputation) -> Self {
        Self {
            user_id: &reputation.user_id,
            risk_percentage: reputation.risk_percentage,
            risk_level: reputation.risk_level.as_str(),
            transactions_analyzed: reputation.transactions_analyzed,
            message: reputation.message()
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    pub resolved: usize,
    pub unknown: usize,
    pub invalid: usize
}

/// Streams lookup requests through a shared reputation service.
pub struct AsyncEngine<S, M> {
    service: Arc<ReputationService<S, M>>,
    backpressure: usize
}

impl<S: Storage, M: RiskModel> AsyncEngine<S, M> {
    /// Creates a new engine instance over the loaded service.
    pub fn new(service: Arc<ReputationService<S, M>>) -> Self {
        Self {
            service,
            backpressure: 256
        }
    }

    /// Reads one request per line from `input` and writes a CSV row per known user to `output`.
    pub async fn run<R, W>(&self, input: R, output: W) -> anyhow::Result<RunSummary>
    where
        R: Read + Send + 'static,
        W: Write,
    {
        let (sender, receiver) = mpsc::channel::<String>(self.backpressure);
        let reader_handle = self.spawn_request_reader(input, sender);
        let processing_result = self.process_requests(receiver, output).await;

        if let Err(error) = reader_handle.await {
            error!("Request ingestion failed: {error}");
        }

        let summary = processing_result?;

        info!("Resolved {} users, {} unknown, {} invalid requests", summary.resolved, summary.unknown, summary.invalid);

        Ok(summary)
    }

    fn spawn_request_reader<R: Read + Send + 'static>(&self, input: R, sender: mpsc::Sender<String>) -> JoinHandle<()> {
        spawn_blocking(move || {
            for line in BufReader::new(input).lines() {
                match line {
                    Ok(line) => {
                        if sender.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("Error reading request: {error}");
                        break;
                    }
                }
            }
        })
    }

    async fn process_requests<W: Write>(&self, mut receiver: mpsc::Receiver<String>, output: W) -> anyhow::Result<RunSummary> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(output);

        writer.write_record(OUTPUT_HEADER)?;

        let mut summary = RunSummary::default();

        while let Some(line) = receiver.recv().await {
            if line.trim().is_empty() {
                continue;
            }

            let payload = match ScanPayload::from_str(&line) {
                Ok(payload) => payload,
                Err(error) => {
                    warn!("{error}");
                    summary.invalid += 1;
                    continue;
                }
            };

            let service = self.service.clone();
            let user_id = payload.into_user_id();

            match spawn_blocking(move || service.get_reputation(&user_id)).await? {
                Ok(reputation) => {
                    writer.serialize(ReputationRow::from(&reputation))?;
                    summary.resolved += 1;
                },
                Err(error) => {
                    warn!("{error}");
                    summary.unknown += 1;
                }
            }
        }

        writer.flush()?;

        Ok(summary)
    }
}
