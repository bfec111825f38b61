//! Client process: starts a hello world workflow and prints its result.

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Parser;
use greetflow_client::{Client, ClientOptions, StartWorkflowOptions, WorkflowClient};
use greetflow_core::{DataConverter, JsonDataConverter};
use hello_world::config::ClientArgs;
use hello_world::tracing_setup::init_tracing;
use hello_world::workflows::{HelloWorldInput, HelloWorldOutput, HELLO_WORLD_WORKFLOW};
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let args = ClientArgs::parse();
    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Client failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ClientArgs) -> anyhow::Result<()> {
    let connection = args.connection;
    let client = WorkflowClient::connect(
        &connection.address,
        connection.namespace.as_str(),
        ClientOptions::default(),
    )
    .await
    .with_context(|| format!("failed to connect to {}", connection.address))?;

    let workflow_id = format!("hello-world-{}", Utc::now().timestamp_millis());
    println!("Starting workflow: {workflow_id}");

    let mut input = HelloWorldInput::new(args.name);
    input.include_goodbye = !args.no_goodbye;
    let converter = JsonDataConverter::new();
    let payload = converter.encode(&input)?;
    debug!(?input, "workflow input");

    let run = client
        .execute_workflow(
            StartWorkflowOptions::new(&workflow_id, connection.task_queue.as_str()),
            HELLO_WORLD_WORKFLOW,
            Some(&payload),
        )
        .await?;
    println!("Workflow started: {}", run.workflow_id());
    println!("Run ID: {}", run.run_id());

    let result = run
        .get()
        .await?
        .ok_or_else(|| anyhow!("workflow completed without a result"))?;
    let output: HelloWorldOutput = converter.decode(&result)?;

    println!("\nWorkflow completed!");
    println!("Result: {}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
