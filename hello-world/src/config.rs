//! Command line and environment configuration for the driver binaries.

use crate::TASK_QUEUE;
use clap::{Args, Parser};

/// Where the workflow service lives and which queue to use
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Workflow service address, `host:port` or a URL
    #[arg(long, env = "ADDRESS", default_value = "localhost:7233")]
    pub address: String,

    /// Namespace
    #[arg(long, env = "NAMESPACE", default_value = "default")]
    pub namespace: String,

    /// Task queue name
    #[arg(long, env = "TASK_QUEUE", default_value = TASK_QUEUE)]
    pub task_queue: String,
}

/// Hosts the hello world workflow and its activities (runs until Ctrl+C)
#[derive(Parser, Debug, Clone)]
#[command(name = "hello-worker", version)]
pub struct WorkerArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Starts a hello world workflow and prints its result
#[derive(Parser, Debug, Clone)]
#[command(name = "hello-client", version)]
pub struct ClientArgs {
    /// Name to greet
    #[arg(default_value = "World")]
    pub name: String,

    /// Skip the farewell step
    #[arg(long)]
    pub no_goodbye: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_args_parse_flags() {
        let args = ClientArgs::try_parse_from([
            "hello-client",
            "Ada",
            "--no-goodbye",
            "--address",
            "flow.internal:7233",
            "--namespace",
            "staging",
            "--task-queue",
            "greetings",
        ])
        .unwrap();
        assert_eq!(args.name, "Ada");
        assert!(args.no_goodbye);
        assert_eq!(args.connection.address, "flow.internal:7233");
        assert_eq!(args.connection.namespace, "staging");
        assert_eq!(args.connection.task_queue, "greetings");
    }

    #[test]
    fn name_defaults_to_world() {
        let args = ClientArgs::try_parse_from(["hello-client"]).unwrap();
        assert_eq!(args.name, "World");
        assert!(!args.no_goodbye);
    }

    #[test]
    fn worker_args_accept_verbose() {
        let args = WorkerArgs::try_parse_from(["hello-worker", "-v"]).unwrap();
        assert!(args.verbose);
    }
}
