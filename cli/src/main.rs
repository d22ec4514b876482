//! promptgate command-line front end.
//!
//! Runs single requests through the full verify → audit → dispatch pipeline
//! and performs the operator-side lockfile checks.
//!
//! Usage:
//!   promptgate verify --agent-id domain-01-content --hash 5b469f...
//!   promptgate handle --method POST --path /dispatch --body '{"agent_id":"..."}'
//!   promptgate manifest
//!   promptgate check-hashes --root .
//!   promptgate sync-check cloudflare-worker/prompt-lock.json
//!
//! Every command exits 1 when the request is refused or the check fails.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use promptgate_audit::InMemoryAuditWriter;
use promptgate_contracts::error::{GateError, GateResult};
use promptgate_gateway::{AttestationTarget, Gateway, GatewayConfig, GatewayResponse};
use promptgate_registry::{integrity::check_files, sync::compare, Registry, RegistryHandle};

const DEFAULT_LOCKFILE: &str = "versions/prompt-lock.json";

// ── CLI definition ────────────────────────────────────────────────────────────

/// promptgate: hash-attested prompt dispatch.
#[derive(Parser)]
#[command(
    name = "promptgate",
    about = "Verify prompt hashes against an immutable lockfile",
    long_about = "Verifies (agent_id, prompt_hash) pairs against a prompt lockfile,\n\
                  audits every decision, and checks that lockfiles and prompt files agree."
)]
struct Cli {
    /// Gateway configuration (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lockfile to load. Overrides `registry_path` from the config.
    #[arg(long, global = true)]
    lockfile: Option<PathBuf>,

    /// Print the sealed audit log after the command runs.
    #[arg(long, global = true)]
    audit: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify one agent/hash pair and print the response.
    Verify {
        #[arg(long)]
        agent_id: String,
        #[arg(long = "hash")]
        prompt_hash: String,
    },
    /// Run one raw request through the gateway.
    Handle {
        #[arg(long, default_value = "POST")]
        method: String,
        #[arg(long, default_value = "/dispatch")]
        path: String,
        /// Request `Content-Type` header. Empty means none was sent.
        #[arg(long, default_value = "application/json")]
        content_type: String,
        /// Request body as a JSON string.
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the request body from a file.
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Print the registry manifest.
    Manifest,
    /// Recompute every prompt file's SHA-256 and compare with the lockfile.
    CheckHashes {
        /// Directory prompt file paths are relative to.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Compare the lockfile with another copy.
    SyncCheck {
        other: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("promptgate error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the selected command. `Ok(false)` means the command ran but the
/// request was refused or the check failed.
fn run(cli: Cli) -> GateResult<bool> {
    let config = match &cli.config {
        Some(path) => GatewayConfig::from_file(path)?,
        None => GatewayConfig::default(),
    };
    let lockfile = cli
        .lockfile
        .clone()
        .or_else(|| config.registry_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCKFILE));

    debug!(lockfile = %lockfile.display(), "loading registry");
    let registry = Registry::from_file(&lockfile)?;

    match cli.command {
        Command::Verify {
            agent_id,
            prompt_hash,
        } => {
            let body = serde_json::json!({ "agent_id": agent_id, "prompt_hash": prompt_hash });
            run_request(
                config,
                registry,
                "POST",
                "/dispatch",
                Some("application/json"),
                body.to_string().as_bytes(),
                cli.audit,
            )
        }
        Command::Handle {
            method,
            path,
            content_type,
            body,
            body_file,
        } => {
            let bytes = match (body, body_file) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(file)) => read_body(&file)?,
                (None, None) => Vec::new(),
            };
            let content_type = Some(content_type.as_str()).filter(|ct| !ct.is_empty());
            run_request(
                config,
                registry,
                &method,
                &path,
                content_type,
                &bytes,
                cli.audit,
            )
        }
        Command::Manifest => {
            print_json(&registry.manifest());
            Ok(true)
        }
        Command::CheckHashes { root } => {
            let report = check_files(&registry, &root);
            print_json(&report);
            println!(
                "{} verified, {} failed, {} with incomplete metadata",
                report.verified_count(),
                report.failed_count(),
                report.incomplete_metadata.len()
            );
            if !report.total_matches_declared() {
                println!(
                    "declared total {:?} does not match {} registered prompts",
                    report.declared_total, report.actual_total
                );
            }
            Ok(report.passed())
        }
        Command::SyncCheck { other } => {
            let other = Registry::from_file(&other)?;
            let report = compare(&registry, &other);
            print_json(&report);
            println!("{}", if report.in_sync() { "lockfiles in sync" } else { "lockfiles differ" });
            Ok(report.in_sync())
        }
    }
}

fn run_request(
    config: GatewayConfig,
    registry: Registry,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
    show_audit: bool,
) -> GateResult<bool> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let audit = InMemoryAuditWriter::new(session_id.clone());
    let gateway = Gateway::new(
        config,
        RegistryHandle::new(registry),
        Box::new(audit.clone()),
        Box::new(AttestationTarget),
    );

    let response = gateway.handle(method, path, content_type, body);
    print_response(&response);
    gateway.shutdown(&session_id)?;

    if show_audit {
        let log = audit.export_log()?;
        println!();
        println!(
            "audit: {} events ({} allowed, {} denied), chain intact: {}",
            log.events.len(),
            log.allowed_count(),
            log.denied_count(),
            audit.verify_integrity()
        );
        print_json(&log);
    }

    Ok(response.status < 400)
}

fn read_body(path: &Path) -> GateResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| GateError::InvalidRequest {
        reason: format!("cannot read body file '{}': {}", path.display(), e),
    })
}

fn print_response(response: &GatewayResponse) {
    println!("HTTP {}", response.status);
    for (name, value) in &response.headers {
        println!("{name}: {value}");
    }
    println!();
    println!("{}", response.body_text());
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("cannot render output: {e}"),
    }
}
