use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use robson_core::{AnalysisStore, Mnemonic, Settings};
use ropey::Rope;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation, Url};
use tower_lsp::Client;
use twox_hash::XxHash64;

/// An open Robson document.
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
    pub(crate) content_hash: u64,
}

impl Document {
    pub(crate) fn new(text: &str, version: i32) -> Self {
        Self {
            content: Rope::from_str(text),
            version,
            content_hash: content_hash(text),
        }
    }
}

pub(crate) fn content_hash(content: &str) -> u64 {
    let mut hasher = XxHash64::default();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Client capabilities recorded at `initialize`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ClientFlags {
    pub(crate) configuration: bool,
    pub(crate) workspace_folders: bool,
    pub(crate) related_information: bool,
}

/// Server state shared across handlers.
pub(crate) struct RobsonLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) analyses: AnalysisStore<Url>,
    pub(crate) settings_cache: DashMap<Url, Settings>,
    pub(crate) global_settings: RwLock<Settings>,
    pub(crate) client_flags: OnceCell<ClientFlags>,
}

impl RobsonLanguageServer {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            analyses: AnalysisStore::new(),
            settings_cache: DashMap::new(),
            global_settings: RwLock::new(Settings::default()),
            client_flags: OnceCell::new(),
        }
    }

    pub(crate) fn flags(&self) -> ClientFlags {
        self.client_flags.get().copied().unwrap_or_default()
    }

    pub(crate) fn get_completions(&self, uri: &Url) -> Vec<CompletionItem> {
        match self.analyses.get(uri) {
            Some(analysis) => completion_items(analysis.symbols.alias_names()),
            None => completion_items(std::iter::empty::<&str>()),
        }
    }
}

/// Built-in mnemonics, tagged for later resolution, followed by the declared aliases.
pub fn completion_items<'a>(aliases: impl IntoIterator<Item = &'a str>) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = Mnemonic::ALL
        .iter()
        .map(|mnemonic| CompletionItem {
            label: mnemonic.keyword().to_string(),
            kind: Some(match mnemonic {
                Mnemonic::Robson => CompletionItemKind::KEYWORD,
                _ => CompletionItemKind::TYPE_PARAMETER,
            }),
            data: Some(serde_json::Value::String(mnemonic.tag().to_string())),
            ..Default::default()
        })
        .collect();

    items.extend(aliases.into_iter().map(|alias| CompletionItem {
        label: alias.to_string(),
        kind: Some(CompletionItemKind::FUNCTION),
        ..Default::default()
    }));
    items
}

/// Fills detail and documentation for a tagged mnemonic item. Other items
/// come back unchanged.
pub fn resolve_completion(mut item: CompletionItem) -> CompletionItem {
    let mnemonic = item
        .data
        .as_ref()
        .and_then(|data| data.as_str())
        .and_then(Mnemonic::from_tag);
    if let Some(mnemonic) = mnemonic {
        item.detail = Some(mnemonic.detail().to_string());
        item.documentation = Some(Documentation::String(mnemonic.documentation().to_string()));
    }
    item
}
