//! Worker process: hosts the hello world workflow and its activities.

use anyhow::Context;
use clap::Parser;
use greetflow_client::GrpcWorkflowServiceClient;
use greetflow_worker::{GreetflowWorker, WorkerOptions, WorkflowRegistry};
use hello_world::config::WorkerArgs;
use hello_world::tracing_setup::init_tracing;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = WorkerArgs::parse();
    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "worker failed");
            eprintln!("Worker failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: WorkerArgs) -> anyhow::Result<()> {
    let connection = args.connection;
    let service = GrpcWorkflowServiceClient::connect(&connection.address, Duration::from_secs(10))
        .await
        .with_context(|| format!("failed to connect to {}", connection.address))?;

    let registry = Arc::new(WorkflowRegistry::new());
    hello_world::register_all(&*registry);

    let mut worker = GreetflowWorker::new(
        Arc::new(service),
        connection.namespace.as_str(),
        connection.task_queue.as_str(),
        WorkerOptions::default(),
        registry,
    );
    worker.start()?;
    info!("Worker started, listening on task queue: {}", connection.task_queue);
    info!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    info!("shutting down");
    worker.stop().await;
    Ok(())
}
