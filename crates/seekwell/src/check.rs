// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seekwell check` command implementation.
//!
//! Pings the backend of every configured server and reports which ones
//! answer. Disabled servers are reported without a ping.

use std::io::IsTerminal;

use seekwell_config::model::SeekwellConfig;
use seekwell_core::{HealthStatus, SeekwellError};
use seekwell_registry::{ServerHealth, ServerRegistry};

use crate::serve::open_stack;

/// Ping every server in registry order.
pub async fn check_servers(servers: &ServerRegistry) -> Result<Vec<ServerHealth>, SeekwellError> {
    let mut results = Vec::new();
    for server in servers.list_servers().await? {
        results.push(servers.check_health(&server.id).await?);
    }
    Ok(results)
}

/// Run the `seekwell check` command. Returns `true` when every server is healthy.
pub async fn run_check(
    config: &SeekwellConfig,
    json: bool,
    plain: bool,
) -> Result<bool, SeekwellError> {
    let stack = open_stack(config).await?;
    let results = check_servers(&stack.servers).await;
    stack.store.close().await?;
    let results = results?;

    if json {
        let out = serde_json::to_string_pretty(&results)
            .map_err(|e| SeekwellError::Internal(format!("failed to encode results: {e}")))?;
        println!("{out}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_results(&results, use_color);
    }

    Ok(results
        .iter()
        .all(|r| matches!(r.status, HealthStatus::Healthy)))
}

fn print_results(results: &[ServerHealth], use_color: bool) {
    println!();
    println!("  seekwell check");
    println!("  {}", "-".repeat(35));
    if results.is_empty() {
        println!("    no servers configured");
    }
    for result in results {
        println!(
            "    {:<20} {:<14} {}",
            result.server_id,
            result.backend_type.to_string(),
            status_label(&result.status, use_color)
        );
    }
    println!();
}

fn status_label(status: &HealthStatus, use_color: bool) -> String {
    use colored::Colorize;
    match (status, use_color) {
        (HealthStatus::Healthy, true) => format!("{} {}", "✓".green(), "reachable".green()),
        (HealthStatus::Healthy, false) => "[OK] reachable".to_string(),
        (HealthStatus::Degraded(reason), true) => format!("{} {}", "!".yellow(), reason.yellow()),
        (HealthStatus::Degraded(reason), false) => format!("[WARN] {reason}"),
        (HealthStatus::Unhealthy(reason), true) => format!("{} {}", "✗".red(), reason.red()),
        (HealthStatus::Unhealthy(reason), false) => format!("[FAIL] {reason}"),
    }
}
