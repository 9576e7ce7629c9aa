use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::document::{PREVIEW_CHARS, PREVIEW_FIELDS};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub listing: ListingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DOCEX_PROFILE`. When set (e.g. `PROD`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("DOCEX_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            store: StoreConfig::from_env_profiled(p),
            export: ExportConfig::from_env_profiled(p),
            listing: ListingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  store:    documents_file={}",
            self.store
                .documents_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
        tracing::info!(
            "  export:   out_dir={}",
            self.export
                .out_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unset)".to_string())
        );
        tracing::info!(
            "  listing:  preview_fields={}, preview_chars={}",
            self.listing.preview_fields,
            self.listing.preview_chars
        );
    }
}

// ── Store ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Saved store response (listing envelope or bare array) to read documents from.
    pub documents_file: Option<PathBuf>,
}

impl StoreConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            documents_file: profiled_env_opt(p, "DOCUMENTS_FILE").map(PathBuf::from),
        }
    }
}

// ── Export ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are delivered to.
    pub out_dir: Option<PathBuf>,
}

impl ExportConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            out_dir: profiled_env_opt(p, "EXPORT_DIR").map(PathBuf::from),
        }
    }
}

// ── Listing ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub preview_fields: usize,
    pub preview_chars: usize,
}

impl ListingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            preview_fields: profiled_env_usize(p, "PREVIEW_FIELDS", PREVIEW_FIELDS),
            preview_chars: profiled_env_usize(p, "PREVIEW_CHARS", PREVIEW_CHARS),
        }
    }
}
