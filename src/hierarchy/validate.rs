//! Hierarchy path validation.
//!
//! Checks a set of [`HierarchyPath`]s for the properties the builder
//! guarantees:
//! - every path has one id per level
//! - ids on each level are contiguous from 0
//! - every group has exactly one parent group
//! - group ids are laid out parent by parent
//!
//! # Example
//!
//! ```rust
//! use lodgroup::hierarchy::validate_paths;
//!
//! // Finest level first: two fine groups under one coarse group.
//! let paths = vec![vec![0, 0], vec![1, 0], vec![1, 0]];
//! let report = validate_paths(&paths, 2);
//! assert!(report.is_clean());
//!
//! // Fine group 1 appears under two different coarse groups.
//! let broken = vec![vec![0, 0], vec![1, 0], vec![1, 1]];
//! assert!(!validate_paths(&broken, 2).is_healthy());
//! ```

use std::collections::{BTreeMap, HashMap};

use super::builder::HierarchyPath;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// Unusual but consumable.
    Warning,
    /// The paths cannot be turned into a forest.
    Error,
    /// The paths contradict each other.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single issue found in a set of paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Level involved, 0 = coarsest.
    pub level: Option<usize>,
    /// Point index involved.
    pub point: Option<usize>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            level: None,
            point: None,
        }
    }

    /// Attach the level.
    pub fn at_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Attach the point index.
    pub fn for_point(mut self, point: usize) -> Self {
        self.point = Some(point);
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(level) = self.level {
            write!(f, " (level {})", level)?;
        }
        if let Some(point) = self.point {
            write!(f, " (point {})", point)?;
        }
        Ok(())
    }
}

/// Issues found by [`validate_paths`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True if no issue is an error or worse.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// True if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of `min_severity` or worse.
    pub fn issues_at_level(&self, min_severity: Severity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity >= min_severity)
            .collect()
    }

    /// Count issues by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_default() += 1;
        }
        counts
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "Validation passed: no issues found");
        }

        let counts = self.counts();
        write!(f, "Validation report: ")?;

        let parts: Vec<String> = [
            (Severity::Critical, "critical"),
            (Severity::Error, "errors"),
            (Severity::Warning, "warnings"),
            (Severity::Info, "info"),
        ]
        .iter()
        .filter_map(|(sev, name)| counts.get(sev).map(|c| format!("{} {}", c, name)))
        .collect();

        writeln!(f, "{}", parts.join(", "))?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// Check `paths` (finest level first) against a hierarchy of `depth` levels.
///
/// Levels in the report are numbered coarsest first, as in
/// [`HierarchyConfig`](super::HierarchyConfig).
pub fn validate_paths(paths: &[HierarchyPath], depth: usize) -> ValidationReport {
    let mut report = ValidationReport::new();
    if paths.is_empty() {
        report.add(ValidationIssue::new(Severity::Info, "no paths"));
        return report;
    }

    let mut complete = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        if path.len() == depth {
            complete.push(path);
        } else {
            report.add(
                ValidationIssue::new(
                    Severity::Error,
                    format!("path has {} ids, expected {}", path.len(), depth),
                )
                .for_point(i),
            );
        }
    }

    for level in 0..depth {
        let index = depth - 1 - level;

        // group id -> parent id (None at level 0)
        let mut parents: BTreeMap<usize, Option<usize>> = BTreeMap::new();
        for path in &complete {
            let group = path[index];
            let parent = (level > 0).then(|| path[index + 1]);
            match parents.get(&group) {
                None => {
                    parents.insert(group, parent);
                }
                Some(&known) if known != parent => report.add(
                    ValidationIssue::new(
                        Severity::Critical,
                        format!("group {} has more than one parent", group),
                    )
                    .at_level(level),
                ),
                Some(_) => {}
            }
        }

        let n_groups = parents.keys().next_back().map_or(0, |&m| m + 1);
        if n_groups != parents.len() {
            report.add(
                ValidationIssue::new(
                    Severity::Error,
                    format!(
                        "{} of {} group ids unused",
                        n_groups - parents.len(),
                        n_groups
                    ),
                )
                .at_level(level),
            );
        }

        let ordered = parents
            .values()
            .zip(parents.values().skip(1))
            .all(|(a, b)| a <= b);
        if !ordered {
            report.add(
                ValidationIssue::new(Severity::Warning, "group ids are not grouped by parent")
                    .at_level(level),
            );
        }
    }

    report
}
