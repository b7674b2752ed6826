//! Verification configuration.
//!
//! Defaults are built in per profile and stay immutable for the process
//! lifetime. An optional `labelcheck.toml` can override the repository
//! coordinates and thresholds; overrides are merged field-by-field onto the
//! profile defaults. Credentials come from the environment, with a local
//! `.env` file honored when present.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::labels::ParseMode;

/// Default path of the override file, consulted when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "labelcheck.toml";

/// Which of the two observed verification pipelines to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// All nine checks; missing prerequisites are critical and halt the run.
    Full,
    /// Environment, branch, document and issue checks only; document
    /// shortfalls and a missing issue are warnings.
    Quick,
}

/// Static configuration for one verification run.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    pub target_repo: String,
    pub branch: String,
    pub doc_file: String,
    pub table_header: String,
    pub min_label_count: usize,
    pub parse_mode: ParseMode,
    pub issues_page_size: u32,
    pub issue_title_keywords: Vec<String>,
    pub issue_body_keywords: Vec<String>,
    pub issue_required_labels: Vec<String>,
    pub issue_required_sections: Vec<String>,
    pub pr_title_keywords: Vec<String>,
    pub pr_required_sections: Vec<String>,
    pub pr_min_label_count: usize,
    pub completion_keywords: Vec<String>,
    pub expected_labels: Vec<String>,
    pub core_labels: Vec<String>,
}

impl VerifyConfig {
    /// Built-in defaults for a profile. The keyword lists are bilingual on
    /// purpose; the upstream standardization process used both languages.
    pub fn for_profile(profile: Profile) -> Self {
        let base = Self {
            target_repo: "GIT-HUB".to_string(),
            branch: "feat/label-standardization".to_string(),
            doc_file: "docs/labels-standard.md".to_string(),
            table_header: "| 标签名称 | 颜色值 | 描述 |".to_string(),
            min_label_count: 15,
            parse_mode: ParseMode::HeaderAnchored,
            issues_page_size: 50,
            issue_title_keywords: string_vec(&["标签标准化", "Label Standardization"]),
            issue_body_keywords: string_vec(&["标签体系", "颜色规范", "标准化需求"]),
            issue_required_labels: string_vec(&["enhancement", "documentation"]),
            issue_required_sections: string_vec(&["## 问题描述", "## 预期标准", "## 标签清单"]),
            pr_title_keywords: string_vec(&[
                "实施标签标准化",
                "Label Standardization Implementation",
            ]),
            pr_required_sections: string_vec(&["## 修改摘要", "## 标签变更", "## 测试结果"]),
            pr_min_label_count: 3,
            completion_keywords: string_vec(&["完成", "完成验证", "已验证", "标准化完成"]),
            expected_labels: string_vec(&[
                "bug",
                "enhancement",
                "documentation",
                "feature",
                "question",
                "help-wanted",
                "good-first-issue",
                "priority-high",
                "priority-medium",
                "priority-low",
                "status-in-progress",
                "status-review",
                "status-done",
                "status-blocked",
                "wontfix",
            ]),
            core_labels: string_vec(&[
                "bug",
                "enhancement",
                "documentation",
                "priority-high",
                "priority-medium",
                "priority-low",
            ]),
        };

        match profile {
            Profile::Full => base,
            Profile::Quick => Self {
                branch: "main".to_string(),
                doc_file: "docs/label-color-standardization.md".to_string(),
                min_label_count: 12,
                parse_mode: ParseMode::Heuristic,
                issues_page_size: 100,
                issue_title_keywords: string_vec(&["标签", "label", "标准化"]),
                issue_body_keywords: string_vec(&["标签体系", "颜色规范"]),
                ..base
            },
        }
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(repo) = overrides.target_repo {
            self.target_repo = repo;
        }
        if let Some(branch) = overrides.branch {
            self.branch = branch;
        }
        if let Some(doc_file) = overrides.doc_file {
            self.doc_file = doc_file;
        }
        if let Some(min) = overrides.min_label_count {
            self.min_label_count = min;
        }
        if let Some(mode) = overrides.parse_mode {
            self.parse_mode = mode;
        }
        if let Some(expected) = overrides.expected_labels {
            self.expected_labels = expected;
        }
        if let Some(core) = overrides.core_labels {
            self.core_labels = core;
        }
    }
}

/// Optional overrides read from `labelcheck.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub target_repo: Option<String>,
    pub branch: Option<String>,
    pub doc_file: Option<String>,
    pub min_label_count: Option<usize>,
    pub parse_mode: Option<ParseMode>,
    pub expected_labels: Option<Vec<String>>,
    pub core_labels: Option<Vec<String>>,
}

/// Resolve the configuration for a run.
///
/// An explicit `--config` path must exist; the default override file is
/// silently skipped when absent.
pub fn load(profile: Profile, config_path: Option<&Path>) -> Result<VerifyConfig> {
    let mut config = VerifyConfig::for_profile(profile);

    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            default.exists().then(|| default.to_path_buf())
        }
    };

    if let Some(path) = path {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let overrides: ConfigOverrides = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.apply(overrides);
    }

    Ok(config)
}

/// Credentials picked up from the process environment.
#[derive(Debug)]
pub struct Environment {
    pub token: Option<String>,
    pub org: Option<String>,
}

impl Environment {
    /// Load `.env` if present, then read the required variables.
    /// Empty values count as unset.
    pub fn load() -> Self {
        dotenvy::from_filename(".env").ok();
        Self {
            token: env_nonempty("GITHUB_TOKEN"),
            org: env_nonempty("GITHUB_ORG"),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
