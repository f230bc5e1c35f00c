use crate::error::{Result, StackgenError};
use crate::guidance::{DEFAULT_FILE_NAME, GuidanceHeader};
use crate::placeholder::{Placeholder, PlaceholderSet, find_tokens};
use crate::template::TemplateEntry;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the built-in bundle, also the default output directory
pub const MONITORING_STACK: &str = "monitoring-stack-parameterized";

/// Everything needed to generate one bundle: templates, bindings and guidance text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub name: String,
    pub header: GuidanceHeader,
    /// Guidance file path relative to the output root
    pub guidance_file: String,
    pub templates: Vec<TemplateEntry>,
    pub placeholders: PlaceholderSet,
}

/// On-disk JSON form of a bundle
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleManifest {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    guidance_file: Option<String>,
    templates: Vec<TemplateEntry>,
    #[serde(default)]
    placeholders: PlaceholderSet,
}

impl From<BundleManifest> for Bundle {
    fn from(manifest: BundleManifest) -> Self {
        let defaults = GuidanceHeader::default();
        Self {
            name: manifest.name,
            header: GuidanceHeader {
                title: manifest.title.unwrap_or(defaults.title),
                intro: manifest.intro.unwrap_or(defaults.intro),
            },
            guidance_file: manifest
                .guidance_file
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            templates: manifest.templates,
            placeholders: manifest.placeholders,
        }
    }
}

impl Bundle {
    /// Prometheus, Grafana, postgres-exporter, cAdvisor and Alertmanager
    /// wired for docker compose, with example values for every placeholder.
    pub fn monitoring_stack() -> Self {
        let templates = vec![
            TemplateEntry::new(
                "docker-compose.yml",
                include_str!("../templates/monitoring-stack/docker-compose.yml"),
            ),
            TemplateEntry::new(
                "prometheus/prometheus.yml",
                include_str!("../templates/monitoring-stack/prometheus/prometheus.yml"),
            ),
            TemplateEntry::new(
                "grafana/provisioning/datasources.yml",
                include_str!("../templates/monitoring-stack/grafana/provisioning/datasources.yml"),
            ),
            TemplateEntry::new(
                "grafana/provisioning/dashboards.yml",
                include_str!("../templates/monitoring-stack/grafana/provisioning/dashboards.yml"),
            ),
            TemplateEntry::new(
                "alertmanager/alertmanager.yml",
                include_str!("../templates/monitoring-stack/alertmanager/alertmanager.yml"),
            ),
            TemplateEntry::new(
                "grafana/dashboards/PostgreSQL.json",
                include_str!("../templates/monitoring-stack/grafana/dashboards/PostgreSQL.json"),
            ),
            TemplateEntry::new(
                "grafana/dashboards/Docker-ECR.json",
                include_str!("../templates/monitoring-stack/grafana/dashboards/Docker-ECR.json"),
            ),
        ];

        let placeholders = PlaceholderSet::from(vec![
            Placeholder::new(
                "<REPLACE_DB_USER>",
                "my_pg_user",
                "Enter your PostgreSQL username",
            ),
            Placeholder::new(
                "<REPLACE_DB_PASSWORD>",
                "my_pg_password",
                "Enter your PostgreSQL password",
            ),
            Placeholder::new(
                "<REPLACE_DB_HOST>",
                "mydb.example.com",
                "Enter your PostgreSQL host (IP or DNS)",
            ),
            Placeholder::new(
                "<REPLACE_DB_NAME>",
                "mydb",
                "Enter your PostgreSQL database name",
            ),
            Placeholder::new(
                "<YOUR_JIRA_WEBHOOK_URL>",
                "https://jira.example.com/webhook",
                "Enter your Jira webhook URL",
            ),
        ]);

        Self {
            name: MONITORING_STACK.to_string(),
            header: GuidanceHeader::default(),
            guidance_file: DEFAULT_FILE_NAME.to_string(),
            templates,
            placeholders,
        }
    }

    /// Parses a bundle manifest from JSON text
    ///
    /// # Errors
    ///
    /// Returns `StackgenError::Json` if the manifest is malformed.
    pub fn from_manifest_str(json: &str) -> Result<Self> {
        let manifest: BundleManifest = serde_json::from_str(json)?;
        Ok(manifest.into())
    }

    /// Loads a bundle manifest from a JSON file
    ///
    /// # Errors
    ///
    /// - `StackgenError::ManifestNotFound` if `path` is not a file.
    /// - `StackgenError::Io` or `StackgenError::Json` on read or parse failure.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(StackgenError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::from_manifest_str(&fs::read_to_string(path)?)
    }

    /// Applies `TOKEN=VALUE` overrides on top of the bundle's own values
    pub fn with_values<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        for (token, value) in overrides {
            self.placeholders.set_value(token.as_ref(), value.as_ref());
        }
        self
    }
}

/// A token used in templates that has no binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundToken {
    pub token: String,
    /// Template paths the token appears in
    pub paths: Vec<String>,
}

/// Findings of [`check_bundle`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub unbound: Vec<UnboundToken>,
    /// Bound tokens that appear in no template
    pub unused: Vec<String>,
    /// `(inner, outer)` pairs where `inner` is a substring of `outer`
    pub overlapping: Vec<(String, String)>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.unbound.is_empty() && self.unused.is_empty() && self.overlapping.is_empty()
    }

    /// One human-readable line per finding
    pub fn findings(&self) -> Vec<String> {
        let mut findings = Vec::new();
        for unbound in &self.unbound {
            findings.push(format!(
                "token {} has no value (used in {})",
                unbound.token,
                unbound.paths.join(", ")
            ));
        }
        for token in &self.unused {
            findings.push(format!("token {token} is not used by any template"));
        }
        for (inner, outer) in &self.overlapping {
            findings.push(format!("token {inner} is a substring of token {outer}"));
        }
        findings
    }
}

/// Cross-checks template tokens against the bundle's bindings
///
/// # Errors
///
/// Returns `StackgenError::Regex` if the token pattern fails to compile.
pub fn check_bundle(bundle: &Bundle) -> Result<ConsistencyReport> {
    let mut report = ConsistencyReport::default();

    for template in &bundle.templates {
        for token in find_tokens(&template.content)? {
            if bundle.placeholders.contains(&token) {
                continue;
            }
            match report.unbound.iter_mut().find(|u| u.token == token) {
                Some(existing) => existing.paths.push(template.path.clone()),
                None => report.unbound.push(UnboundToken {
                    token,
                    paths: vec![template.path.clone()],
                }),
            }
        }
    }

    for placeholder in &bundle.placeholders {
        let used = bundle
            .templates
            .iter()
            .any(|t| t.content.contains(&placeholder.token));
        if !used {
            report.unused.push(placeholder.token.clone());
        }
    }

    report.overlapping = bundle.placeholders.overlapping_tokens();
    Ok(report)
}
