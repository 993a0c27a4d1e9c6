//! Cached, single-flight loading of debug-info bundles.

use super::index::LinkageIndex;
use super::node::DebugInfoNode;
use crate::{logging, DebugInfoError, Result};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// The debug-info payload attached to a loaded source map.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScopeData {
    /// Byte offset of the code section within the module file. Debug-info
    /// addresses are relative to this.
    #[serde(default)]
    pub code_section_offset: u64,
    pub debug_info: Vec<DebugInfoNode>,
    /// Ordered source-name table referenced by call-site file indices.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl RawScopeData {
    /// Deserialize a raw bundle from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DebugInfoError::MalformedDebugInfo(e.to_string()).into())
    }
}

/// A loaded debug-info tree with its linkage index, read-only once built.
#[derive(Debug)]
pub struct DebugInfoBundle {
    pub code_section_offset: u64,
    pub debug_info: Vec<DebugInfoNode>,
    pub sources: Vec<String>,
    pub linkage_index: LinkageIndex,
}

impl DebugInfoBundle {
    pub fn from_raw(raw: RawScopeData) -> Self {
        let linkage_index = LinkageIndex::build(&raw.debug_info);
        Self {
            code_section_offset: raw.code_section_offset,
            debug_info: raw.debug_info,
            sources: raw.sources,
            linkage_index,
        }
    }
}

/// Collaborator that fetches the source map for a source id and extracts its
/// debug-info payload. `Ok(None)` means the source has no debug info.
pub trait SourceMapProvider: Send + Sync {
    fn fetch_scope_data(&self, source_id: &str) -> BoxFuture<'_, Result<Option<RawScopeData>>>;
}

type CacheCell = Arc<OnceCell<Option<Arc<DebugInfoBundle>>>>;

/// Per-source-id bundle cache with single-flight fetches.
///
/// Concurrent loads for the same uncached id share one underlying fetch; a
/// `None` result (no debug info) is cached too, so fruitless fetches are not
/// repeated. Entries live until [`DebugInfoCache::clear`], invoked on
/// debuggee-session teardown. A failed fetch caches nothing; the next load
/// retries.
#[derive(Default)]
pub struct DebugInfoCache {
    entries: Mutex<HashMap<String, CacheCell>>,
}

impl DebugInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the bundle for `source_id`, fetching through `provider` at most
    /// once per id.
    pub async fn load(
        &self,
        provider: &dyn SourceMapProvider,
        source_id: &str,
    ) -> Result<Option<Arc<DebugInfoBundle>>> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(source_id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let bundle = cell
            .get_or_try_init(|| async {
                let raw = provider.fetch_scope_data(source_id).await?;
                match raw {
                    Some(raw) => {
                        let bundle = DebugInfoBundle::from_raw(raw);
                        logging::log_debug_info_loaded(source_id, bundle.debug_info.len());
                        Ok::<_, miette::Report>(Some(Arc::new(bundle)))
                    }
                    None => {
                        logging::log_debug_info_missing(source_id);
                        Ok(None)
                    }
                }
            })
            .await?;

        Ok(bundle.clone())
    }

    /// Drop every cached bundle. Invoked on session teardown.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        logging::log_cache_cleared("debug-info", count);
    }
}
