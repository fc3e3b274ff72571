//! Table rendering for CLI output

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

use super::{extract_kind_from_base64, format_time_ago, ColorTheme, StateIcon};
use crate::infrastructure::api::addons::{AvailableAddon, InstalledAddon};
use crate::infrastructure::api::charts::Chart;
use crate::infrastructure::api::clusters::ClusterListItem;
use crate::infrastructure::api::credentials::Credential;
use crate::infrastructure::api::manifests::ClusterManifest;
use crate::infrastructure::api::operations::{JobStatusUpdate, Operation};
use crate::infrastructure::api::organisations::{Organisation, OrganisationMember};
use crate::infrastructure::api::stacks::{Stack, StackHistoryEntry};
use crate::infrastructure::api::tokens::ApiToken;

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn base_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }

    fn state_cell(&self, state: &str) -> Cell {
        Cell::new(StateIcon::with_state(state)).fg(self.theme.for_state(state))
    }

    pub fn render_clusters(&self, clusters: &[ClusterListItem]) -> String {
        if clusters.is_empty() {
            return "No clusters found".to_string();
        }

        let mut table = self.base_table(&[
            "NAME",
            "KUBE VERSION",
            "NODES",
            "CONTROL PLANES",
            "STATE",
            "KIND",
            "CREATED",
        ]);
        for cluster in clusters {
            table.add_row(vec![
                Cell::new(&cluster.name),
                Cell::new(&cluster.kube_version),
                Cell::new(cluster.nodes).set_alignment(CellAlignment::Center),
                Cell::new(cluster.control_planes).set_alignment(CellAlignment::Center),
                self.state_cell(&cluster.state),
                Cell::new(&cluster.kind),
                Cell::new(format_time_ago(&cluster.created_at)),
            ]);
        }
        table.to_string()
    }

    pub fn render_stacks(&self, stacks: &[Stack]) -> String {
        if stacks.is_empty() {
            return "No stacks found".to_string();
        }

        let mut table = self.base_table(&["NAME", "MANIFESTS", "ADDONS", "STATE", "DESCRIPTION"]);
        for stack in stacks {
            table.add_row(vec![
                Cell::new(&stack.name),
                Cell::new(stack.manifests.len()).set_alignment(CellAlignment::Center),
                Cell::new(stack.addons.len()).set_alignment(CellAlignment::Center),
                self.state_cell(&stack.state),
                Cell::new(&stack.description),
            ]);
        }
        table.to_string()
    }

    pub fn render_stack_history(&self, entries: &[StackHistoryEntry]) -> String {
        if entries.is_empty() {
            return "No history entries found".to_string();
        }

        let mut table = self.base_table(&["VERSION", "CHANGE", "CREATED", "BY", "DESCRIPTION"]);
        for entry in entries {
            table.add_row(vec![
                Cell::new(entry.version).set_alignment(CellAlignment::Center),
                Cell::new(&entry.change_type),
                Cell::new(format_time_ago(&entry.created_at)),
                Cell::new(entry.created_by.as_deref().unwrap_or("-")),
                Cell::new(entry.description.as_deref().unwrap_or("")),
            ]);
        }
        table.to_string()
    }

    pub fn render_addons(&self, addons: &[InstalledAddon]) -> String {
        if addons.is_empty() {
            return "No addons found".to_string();
        }

        let mut table = self.base_table(&[
            "NAME",
            "CHART",
            "VERSION",
            "NAMESPACE",
            "STATE",
            "MANAGED",
            "CREATED",
        ]);
        for addon in addons {
            let state = addon
                .state
                .as_deref()
                .or(addon.health.as_deref())
                .unwrap_or("unknown");
            table.add_row(vec![
                Cell::new(&addon.name),
                Cell::new(&addon.chart_name),
                Cell::new(&addon.chart_version),
                Cell::new(addon.namespace.as_deref().unwrap_or("-")),
                self.state_cell(state),
                Cell::new(if addon.through_ankra { "ankra" } else { "external" }),
                Cell::new(format_time_ago(&addon.created_at)),
            ]);
        }
        table.to_string()
    }

    pub fn render_available_addons(&self, addons: &[AvailableAddon]) -> String {
        if addons.is_empty() {
            return "No available addons found".to_string();
        }

        let mut table = self.base_table(&["NAME", "CHART", "VERSION", "CATEGORY", "DESCRIPTION"]);
        for addon in addons {
            table.add_row(vec![
                Cell::new(&addon.name),
                Cell::new(&addon.chart_name),
                Cell::new(&addon.version),
                Cell::new(addon.category.as_deref().unwrap_or("-")),
                Cell::new(addon.description.as_deref().unwrap_or("")),
            ]);
        }
        table.to_string()
    }

    pub fn render_manifests(&self, manifests: &[ClusterManifest]) -> String {
        if manifests.is_empty() {
            return "No manifests found".to_string();
        }

        let mut table = self.base_table(&["NAME", "KIND", "NAMESPACE", "STATE", "PARENTS"]);
        for manifest in manifests {
            let parents = manifest
                .parents
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![
                Cell::new(&manifest.name),
                Cell::new(extract_kind_from_base64(&manifest.manifest_base64)),
                Cell::new(manifest.namespace.as_deref().unwrap_or("-")),
                self.state_cell(&manifest.state),
                Cell::new(if parents.is_empty() { "-".into() } else { parents }),
            ]);
        }
        table.to_string()
    }

    pub fn render_operations(&self, operations: &[Operation]) -> String {
        if operations.is_empty() {
            return "No operations found".to_string();
        }

        let mut table = self.base_table(&["ID", "NAME", "STATUS", "STARTED", "UPDATED"]);
        for op in operations {
            table.add_row(vec![
                Cell::new(&op.id),
                Cell::new(&op.name),
                self.state_cell(&op.status),
                Cell::new(format_time_ago(&op.created_at)),
                Cell::new(format_time_ago(&op.updated_at)),
            ]);
        }
        table.to_string()
    }

    pub fn render_jobs(&self, jobs: &[JobStatusUpdate]) -> String {
        if jobs.is_empty() {
            return "No jobs found".to_string();
        }

        let mut table = self.base_table(&["ID", "NAME", "STATUS", "STARTED", "UPDATED"]);
        for job in jobs {
            table.add_row(vec![
                Cell::new(&job.id),
                Cell::new(&job.name),
                self.state_cell(&job.status),
                Cell::new(format_time_ago(&job.created_at)),
                Cell::new(format_time_ago(&job.updated_at)),
            ]);
        }
        table.to_string()
    }

    pub fn render_charts(&self, charts: &[Chart]) -> String {
        if charts.is_empty() {
            return "No charts found".to_string();
        }

        let mut table = self.base_table(&["NAME", "VERSION", "REPOSITORY", "DESCRIPTION"]);
        for chart in charts {
            let mut description = chart.description.clone();
            if description.len() > 60 {
                description.truncate(57);
                description.push_str("...");
            }
            table.add_row(vec![
                Cell::new(&chart.name),
                Cell::new(&chart.version),
                Cell::new(&chart.repository_name),
                Cell::new(description),
            ]);
        }
        table.to_string()
    }

    pub fn render_organisations(&self, organisations: &[Organisation]) -> String {
        if organisations.is_empty() {
            return "No organisations found".to_string();
        }

        let mut table = self.base_table(&["ID", "NAME", "ROLE", "STATUS", "CURRENT"]);
        for org in organisations {
            table.add_row(vec![
                Cell::new(&org.organisation_id),
                Cell::new(org.name.as_deref().unwrap_or("-")),
                Cell::new(org.role.as_deref().unwrap_or("-")),
                Cell::new(org.status.as_deref().unwrap_or("-")),
                Cell::new(if org.user_current { "*" } else { "" })
                    .set_alignment(CellAlignment::Center),
            ]);
        }
        table.to_string()
    }

    pub fn render_members(&self, members: &[OrganisationMember]) -> String {
        if members.is_empty() {
            return "No members found".to_string();
        }

        let mut table = self.base_table(&["EMAIL", "NAME", "ROLE", "JOINED"]);
        for member in members {
            table.add_row(vec![
                Cell::new(&member.email),
                Cell::new(member.name.as_deref().unwrap_or("-")),
                Cell::new(&member.role),
                Cell::new(format_time_ago(&member.joined_at)),
            ]);
        }
        table.to_string()
    }

    pub fn render_tokens(&self, tokens: &[ApiToken]) -> String {
        if tokens.is_empty() {
            return "No tokens found".to_string();
        }

        let mut table = self.base_table(&["ID", "NAME", "STATUS", "CREATED", "EXPIRES", "LAST USED"]);
        for token in tokens {
            let status = if token.revoked { "revoked" } else { "active" };
            table.add_row(vec![
                Cell::new(&token.id),
                Cell::new(&token.name),
                self.state_cell(status),
                Cell::new(format_time_ago(&token.created_at)),
                Cell::new(super::format_timestamp(&token.expires_at)),
                Cell::new(
                    token
                        .last_used_at
                        .as_deref()
                        .map(format_time_ago)
                        .unwrap_or_else(|| "never".to_string()),
                ),
            ]);
        }
        table.to_string()
    }

    pub fn render_credentials(&self, credentials: &[Credential]) -> String {
        if credentials.is_empty() {
            return "No credentials found".to_string();
        }

        let mut table = self.base_table(&["ID", "NAME", "PROVIDER", "CREATED"]);
        for credential in credentials {
            table.add_row(vec![
                Cell::new(&credential.id),
                Cell::new(&credential.name),
                Cell::new(&credential.provider),
                Cell::new(format_time_ago(&credential.created_at)),
            ]);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cluster(name: &str, state: &str) -> ClusterListItem {
        ClusterListItem {
            id: "c-1".into(),
            name: name.into(),
            state: state.into(),
            description: String::new(),
            environment: String::new(),
            organisation_id: String::new(),
            kube_distribution: "k3s".into(),
            kube_version: "v1.29.0".into(),
            control_planes: 1,
            nodes: 3,
            created_at: "2025-01-01T00:00:00Z".into(),
            kind: "imported".into(),
            incoming_networks: vec![],
            outgoing_networks: vec![],
            operational_at: None,
            slated_for_deletion_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_render_clusters_contains_rows() {
        let renderer = TableRenderer::new();
        let output =
            renderer.render_clusters(&[sample_cluster("prod", "up"), sample_cluster("dev", "failed")]);
        assert!(output.contains("prod"));
        assert!(output.contains("dev"));
        assert!(output.contains("v1.29.0"));
    }

    #[test]
    fn test_render_empty_lists() {
        let renderer = TableRenderer::new();
        assert_eq!(renderer.render_clusters(&[]), "No clusters found");
        assert_eq!(renderer.render_operations(&[]), "No operations found");
        assert_eq!(renderer.render_tokens(&[]), "No tokens found");
    }

    #[test]
    fn test_render_manifests_extracts_kind() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let renderer = TableRenderer::new();
        let manifest = ClusterManifest {
            name: "app-config".into(),
            manifest_base64: STANDARD.encode("kind: ConfigMap\n"),
            namespace: Some("default".into()),
            parents: vec![],
            state: "up".into(),
        };
        let output = renderer.render_manifests(&[manifest]);
        assert!(output.contains("ConfigMap"));
    }
}
