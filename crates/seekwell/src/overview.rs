// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seekwell overview` command implementation.

use std::fmt::Write as _;
use std::io::IsTerminal;

use seekwell_config::model::SeekwellConfig;
use seekwell_core::SeekwellError;
use seekwell_registry::Overview;

use crate::serve::{local_operator, open_stack};

/// Run the `seekwell overview` command.
///
/// Prints every server and index straight from the config store. With
/// `--json` the overview is printed as-is for scripting.
pub async fn run_overview(
    config: &SeekwellConfig,
    json: bool,
    plain: bool,
) -> Result<(), SeekwellError> {
    let stack = open_stack(config).await?;
    let overview = stack.admin.list_overview(&local_operator()).await;
    stack.store.close().await?;
    let overview = overview?;

    if json {
        let out = serde_json::to_string_pretty(&overview)
            .map_err(|e| SeekwellError::Internal(format!("failed to encode overview: {e}")))?;
        println!("{out}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print!("{}", render_overview(&overview, use_color));
    }
    Ok(())
}

fn status_cell(enabled: bool, use_color: bool) -> String {
    let text = if enabled { "enabled" } else { "disabled" };
    if use_color {
        use colored::Colorize;
        if enabled {
            text.green().to_string()
        } else {
            text.yellow().to_string()
        }
    } else {
        text.to_string()
    }
}

fn render_overview(overview: &Overview, use_color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "  Servers");
    let _ = writeln!(out, "  {}", "-".repeat(60));
    if overview.servers.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for server in &overview.servers {
        let _ = writeln!(
            out,
            "    {:<20} {:<24} {:<14} {:<10} indexes: {}",
            server.id,
            server.label,
            server.backend_type.to_string(),
            status_cell(server.status.is_enabled(), use_color),
            server.dependent_count
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  Indexes");
    let _ = writeln!(out, "  {}", "-".repeat(60));
    if overview.indexes.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for index in &overview.indexes {
        let _ = writeln!(
            out,
            "    {:<20} {:<24} on {:<20} {:<10} fields: {} processors: {}",
            index.id,
            index.label,
            index.server_label,
            status_cell(index.status.is_enabled(), use_color),
            index.field_count,
            index.processor_count
        );
    }

    if !overview.local_actions.is_empty() {
        let _ = writeln!(out);
        for action in &overview.local_actions {
            let _ = writeln!(out, "  + {} ({})", action.title, action.path);
        }
    }
    let _ = writeln!(out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekwell_core::{BackendType, EntityStatus, Settings};
    use seekwell_registry::{IndexSummary, LocalAction, ServerSummary};

    fn overview(local_actions: Vec<LocalAction>) -> Overview {
        Overview {
            servers: vec![ServerSummary {
                id: "s1".to_string(),
                label: "Main Solr".to_string(),
                description: None,
                backend_type: BackendType::Solr,
                backend_settings: Settings::new(),
                status: EntityStatus::Enabled,
                dependent_count: 1,
            }],
            indexes: vec![IndexSummary {
                id: "i1".to_string(),
                label: "Content".to_string(),
                description: None,
                server_id: "s1".to_string(),
                server_label: "Main Solr".to_string(),
                status: EntityStatus::Disabled,
                field_count: 3,
                processor_count: 2,
                reachable: false,
            }],
            local_actions,
        }
    }

    #[test]
    fn plain_table_lists_servers_and_indexes() {
        let out = render_overview(&overview(Vec::new()), false);
        assert!(out.contains("s1"));
        assert!(out.contains("Main Solr"));
        assert!(out.contains("indexes: 1"));
        assert!(out.contains("on Main Solr"));
        assert!(out.contains("disabled"));
        assert!(out.contains("fields: 3 processors: 2"));
        assert!(!out.contains("Add server"));
    }

    #[test]
    fn local_actions_are_listed() {
        let actions = vec![LocalAction {
            title: "Add server".to_string(),
            path: "/admin/config/search/search-api/add-server".to_string(),
        }];
        let out = render_overview(&overview(actions), false);
        assert!(out.contains("+ Add server (/admin/config/search/search-api/add-server)"));
    }

    #[test]
    fn empty_overview_says_none() {
        let empty = Overview {
            servers: Vec::new(),
            indexes: Vec::new(),
            local_actions: Vec::new(),
        };
        let out = render_overview(&empty, false);
        assert_eq!(out.matches("(none)").count(), 2);
    }

    #[test]
    fn overview_serializes_summaries() {
        let json = serde_json::to_value(overview(Vec::new())).unwrap();
        assert_eq!(json["servers"][0]["dependent_count"], 1);
        assert_eq!(json["indexes"][0]["server_label"], "Main Solr");
    }
}
