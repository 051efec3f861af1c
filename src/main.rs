//! # Courier CLI (`courier`)
//!
//! The `courier` binary constructs, validates, and publishes JSON messages
//! to durable AMQP queues. Each subcommand is one activity: it runs to
//! completion, prints a JSON result to stdout, and exits.
//!
//! ## Usage
//!
//! ```bash
//! courier --config ./courier.toml <activity> [flags]
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `courier complete` | Publish a complete chat message (text, reasoning, sources, tasks) |
//! | `courier source-status` | Publish a data-source sync or verification status update |
//! | `courier document-status` | Publish a document-processing status update |
//!
//! ## Examples
//!
//! ```bash
//! # Text-only chat message
//! courier complete --tenant-id t1 --message-id m1 --conversation-id c1 \
//!     --text "All done."
//!
//! # Sync completed for a data-source connection
//! courier source-status --type sync --connection-id conn1 --tenant-id t1 \
//!     --status sync_completed --documents-processed 42
//!
//! # Document processing failed
//! courier document-status --blob-metadata-id blob1 --tenant-id t1 \
//!     --status processing_failed --error-message "unsupported file format"
//!
//! # Validate and assemble without touching the broker
//! courier complete --text "hi" --tenant-id t1 --message-id m1 \
//!     --conversation-id c1 --dry-run
//! ```
//!
//! The result on stdout is `{"status": "success", ...}` with the published
//! message echoed back, or `{"status": "error", "error": ...}` with a
//! non-zero exit code. Diagnostics go to stderr via `tracing`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courier::complete::{send_complete, CompleteInput};
use courier::config::{self, Config};
use courier::document_status::{send_document_status, DocumentStatusInput};
use courier::error::ActivityResult;
use courier::publish::{AmqpPublisher, MemoryPublisher, Publisher, QueueTarget};
use courier::source_status::{send_source_status, SourceStatusInput};

/// Courier — construct, validate, and publish JSON messages to durable
/// AMQP queues.
///
/// Broker settings come from a TOML config file and can be overridden per
/// invocation with `--url` and `--queue`.
#[derive(Parser)]
#[command(
    name = "courier",
    about = "Courier — construct, validate, and publish JSON messages to durable AMQP queues",
    version,
    long_about = "Courier provides three validate-then-publish activities: complete chat \
    messages, data-source status updates, and document-processing status updates. Each \
    invocation validates its inputs, assembles a single JSON envelope, declares the target \
    queue as durable, and publishes the message with persistent delivery."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional — when the file does not exist, broker settings must be
    /// supplied with `--url` (and `--queue` where the default queue name
    /// is not wanted).
    #[arg(long, global = true, default_value = "./courier.toml")]
    config: PathBuf,

    /// Broker URL override (amqp:// or amqps://).
    #[arg(long, global = true)]
    url: Option<String>,

    /// Queue name override for the selected activity.
    #[arg(long, global = true)]
    queue: Option<String>,

    /// Validate and assemble the message, print the receipt, but skip the
    /// broker publish.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

/// One subcommand per activity.
#[derive(Subcommand)]
enum Commands {
    /// Publish a complete chat message with all available components.
    ///
    /// At least one of --text, --reasoning, --sources, or --tasks is
    /// required. Sources and tasks are JSON arrays; extra keys in their
    /// objects are preserved on the wire.
    Complete {
        /// Main response text.
        #[arg(long)]
        text: Option<String>,

        /// Step-by-step analysis content.
        #[arg(long)]
        reasoning: Option<String>,

        /// Custom title for the reasoning section (e.g. "Research & Analysis").
        #[arg(long)]
        reasoning_title: Option<String>,

        /// JSON array of source objects: {url, title, snippet?, blob_id?}.
        #[arg(long)]
        sources: Option<String>,

        /// JSON array of task objects: {title, items, defaultOpen?}.
        #[arg(long)]
        tasks: Option<String>,

        /// UUID v4 grouping related messages.
        #[arg(long)]
        response_group_id: Option<String>,

        /// Tenant identifier.
        #[arg(long)]
        tenant_id: Option<String>,

        /// User message ID this response belongs to.
        #[arg(long)]
        message_id: Option<String>,

        /// Conversation identifier.
        #[arg(long)]
        conversation_id: Option<String>,

        /// UI hint marking the final message of a turn
        /// (true/false, 1/0, yes/no).
        #[arg(long, value_parser = parse_flexible_bool)]
        turn_complete: Option<bool>,

        /// Citation display variant: hover-card, modal, right-panel,
        /// collapsible-list, inline.
        #[arg(long)]
        citation_variant: Option<String>,
    },

    /// Publish a data-source status update (sync or verification).
    SourceStatus {
        /// Message type: 'sync' or 'verification'.
        #[arg(long = "type")]
        message_type: Option<String>,

        /// Data-source connection ID.
        #[arg(long)]
        connection_id: Option<String>,

        /// Tenant identifier.
        #[arg(long)]
        tenant_id: Option<String>,

        /// sync: sync_started | sync_completed | sync_failed;
        /// verification: success | failed (inferred from --error when omitted).
        #[arg(long)]
        status: Option<String>,

        /// Error message for sync failures.
        #[arg(long)]
        error_message: Option<String>,

        /// Number of documents processed (sync_completed).
        #[arg(long)]
        documents_processed: Option<i64>,

        /// JSON object or array of verification options.
        #[arg(long)]
        options: Option<String>,

        /// Verification error message.
        #[arg(long)]
        error: Option<String>,
    },

    /// Publish a document-processing status update.
    DocumentStatus {
        /// UUID of the blob-metadata record.
        #[arg(long)]
        blob_metadata_id: Option<String>,

        /// Tenant identifier.
        #[arg(long)]
        tenant_id: Option<String>,

        /// User who uploaded the document.
        #[arg(long)]
        user_id: Option<String>,

        /// processing_completed | processing_failed.
        #[arg(long)]
        status: Option<String>,

        /// Extracted markdown content (processing_completed).
        #[arg(long)]
        processed_markdown: Option<String>,

        /// Error message (processing_failed).
        #[arg(long)]
        error_message: Option<String>,
    },
}

/// Parse a lenient boolean: true/false, 1/0, yes/no (case-insensitive).
fn parse_flexible_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("invalid boolean value '{other}'")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        Config::minimal()
    };

    let default_queue = match &cli.command {
        Commands::Complete { .. } => cfg.queues.complete.clone(),
        Commands::SourceStatus { .. } => cfg.queues.source_status.clone(),
        Commands::DocumentStatus { .. } => cfg.queues.document_status.clone(),
    };
    let target = QueueTarget::new(
        cli.url.or(cfg.broker.url).unwrap_or_default(),
        cli.queue.unwrap_or(default_queue),
    );

    match dispatch(cli.command, &target, cli.dry_run).await {
        Ok(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        Err(err) => {
            let result = serde_json::json!({ "status": "error", "error": err.to_string() });
            println!("{}", serde_json::to_string_pretty(&result)?);
            std::process::exit(1);
        }
    }
}

async fn dispatch(
    command: Commands,
    target: &QueueTarget,
    dry_run: bool,
) -> ActivityResult<serde_json::Value> {
    let amqp;
    let memory;
    let publisher: &dyn Publisher = if dry_run {
        debug!("dry run: message will be assembled but not published");
        memory = MemoryPublisher::new();
        &memory
    } else {
        amqp = AmqpPublisher::new();
        &amqp
    };

    match command {
        Commands::Complete {
            text,
            reasoning,
            reasoning_title,
            sources,
            tasks,
            response_group_id,
            tenant_id,
            message_id,
            conversation_id,
            turn_complete,
            citation_variant,
        } => {
            let input = CompleteInput {
                text_content: text,
                reasoning_content: reasoning,
                reasoning_title,
                sources,
                tasks,
                response_group_id,
                tenant_id,
                message_id,
                conversation_id,
                turn_complete,
                citation_variant,
            };
            let receipt = send_complete(publisher, target, input).await?;
            Ok(serde_json::to_value(receipt).map_err(anyhow::Error::from)?)
        }
        Commands::SourceStatus {
            message_type,
            connection_id,
            tenant_id,
            status,
            error_message,
            documents_processed,
            options,
            error,
        } => {
            let input = SourceStatusInput {
                message_type,
                connection_id,
                tenant_id,
                status,
                error_message,
                documents_processed,
                verification_options: options,
                verification_error: error,
            };
            let receipt = send_source_status(publisher, target, input).await?;
            Ok(serde_json::to_value(receipt).map_err(anyhow::Error::from)?)
        }
        Commands::DocumentStatus {
            blob_metadata_id,
            tenant_id,
            user_id,
            status,
            processed_markdown,
            error_message,
        } => {
            let input = DocumentStatusInput {
                blob_metadata_id,
                tenant_id,
                user_id,
                status,
                processed_markdown,
                error_message,
            };
            let receipt = send_document_status(publisher, target, input).await?;
            Ok(serde_json::to_value(receipt).map_err(anyhow::Error::from)?)
        }
    }
}
