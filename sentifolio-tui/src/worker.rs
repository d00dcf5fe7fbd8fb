//! Background worker thread — all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The
//! worker owns the blocking `ApiClient`; the main thread never blocks on
//! the network. There is no cancellation: an in-flight request runs to
//! completion and the main thread accepts or discards its result.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use sentifolio_core::api::{ApiClient, ReturnsQuery};
use sentifolio_core::news::Article;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchReturns {
        /// Monotonic id issued by the main thread; echoed back so stale
        /// responses can be discarded.
        request_id: u64,
        query: ReturnsQuery,
    },
    FetchNews {
        date: String,
        tickers: Vec<String>,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    ReturnsLoaded { request_id: u64, payload: Value },
    ReturnsFailed { request_id: u64, error: String },
    NewsLoaded { date: String, articles: Vec<Article> },
    NewsFailed { date: String, error: String },
}

/// Spawn the background worker thread. The client is built by the caller
/// so a bad configuration fails at startup, not mid-session.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    client: ApiClient,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("sentifolio-worker".into())
        .spawn(move || {
            worker_loop(rx, tx, client);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, client: ApiClient) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &client, &tx),
        }
    }
}

fn handle_command(cmd: WorkerCommand, client: &ApiClient, tx: &Sender<WorkerResponse>) {
    match cmd {
        WorkerCommand::FetchReturns { request_id, query } => {
            let resp = match client.portfolio_returns(&query) {
                Ok(payload) => WorkerResponse::ReturnsLoaded {
                    request_id,
                    payload,
                },
                Err(e) => WorkerResponse::ReturnsFailed {
                    request_id,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(resp);
        }
        WorkerCommand::FetchNews { date, tickers } => {
            let resp = match client.news(&tickers) {
                Ok(news) if news.status == "error" => WorkerResponse::NewsFailed {
                    date,
                    error: news
                        .message
                        .unwrap_or_else(|| "news request failed".into()),
                },
                Ok(news) => WorkerResponse::NewsLoaded {
                    date,
                    articles: news.articles,
                },
                Err(e) => WorkerResponse::NewsFailed {
                    date,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(resp);
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentifolio_core::api::ApiConfig;
    use std::sync::mpsc;

    fn test_client() -> ApiClient {
        ApiClient::new(&ApiConfig::default()).unwrap()
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, test_client());
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_stops_when_channel_closes() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx, test_client());
        drop(cmd_tx);
        handle.join().expect("worker should join on hangup");
    }
}
