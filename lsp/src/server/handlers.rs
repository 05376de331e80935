use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::LanguageServer;
use tracing::{debug, info, warn};

use super::{
    actions::{rename_actions, rename_arguments, rename_workspace_edit},
    convert::{from_lsp_position, to_lsp_range},
    inlay_hints::compute_inlay_hints,
    state::{content_hash, resolve_completion, ClientFlags, Document, RobsonLanguageServer},
    text::apply_change,
    RENAME_COMMAND,
};

fn client_flags(capabilities: &ClientCapabilities) -> ClientFlags {
    let workspace = capabilities.workspace.as_ref();
    ClientFlags {
        configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
        workspace_folders: workspace.and_then(|w| w.workspace_folders).unwrap_or(false),
        related_information: capabilities
            .text_document
            .as_ref()
            .and_then(|t| t.publish_diagnostics.as_ref())
            .and_then(|p| p.related_information)
            .unwrap_or(false),
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for RobsonLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Robson Language Server initializing with params: {:?}", params.root_uri);
        let flags = client_flags(&params.capabilities);
        if self.client_flags.set(flags).is_err() {
            warn!("initialize received more than once; keeping the first client capabilities");
        }
        let flags = self.flags();

        let workspace = flags.workspace_folders.then(|| WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: None,
            }),
            file_operations: None,
        });

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    ..Default::default()
                }),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![RENAME_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                definition_provider: Some(OneOf::Left(true)),
                inlay_hint_provider: Some(OneOf::Left(true)),
                workspace,
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "Robson Language Server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("Robson Language Server initialized");
        if self.flags().configuration {
            let registration = Registration {
                id: "robson-did-change-configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            };
            if let Err(err) = self.client.register_capability(vec![registration]).await {
                warn!("could not register for configuration changes: {err}");
            }
        }
        self.client
            .log_message(MessageType::INFO, "Robson Language Server started")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Robson Language Server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if self.flags().configuration {
            self.settings_cache.clear();
        } else {
            self.update_global_settings(&params.settings);
        }
        self.validate_all().await;
    }

    async fn did_change_workspace_folders(&self, _: DidChangeWorkspaceFoldersParams) {
        debug!("workspace folder change event received");
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents
            .insert(doc.uri.clone(), Document::new(&doc.text, doc.version));
        self.validate_document(&doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let changed = {
            let Some(mut doc) = self.documents.get_mut(&uri) else {
                warn!(%uri, "change for a document that is not open");
                return;
            };
            doc.version = params.text_document.version;
            for change in &params.content_changes {
                apply_change(&mut doc.content, change);
            }
            let hash = content_hash(&doc.content.to_string());
            let changed = hash != doc.content_hash;
            doc.content_hash = hash;
            changed
        };

        if changed || self.analyses.get(&uri).is_none() {
            self.validate_document(&uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri);
        self.analyses.remove(&uri);
        self.settings_cache.remove(&uri);
        debug!(%uri, open = self.analyses.len(), "document closed");
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        Ok(Some(CompletionResponse::Array(self.get_completions(uri))))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(resolve_completion(item))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let actions = rename_actions(&params.text_document.uri, &params.context.diagnostics);
        Ok((!actions.is_empty()).then_some(actions))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<serde_json::Value>> {
        if params.command != RENAME_COMMAND {
            warn!("unknown command {}", params.command);
            return Ok(None);
        }
        let Some((uri, range)) = rename_arguments(&params.arguments) else {
            warn!("{RENAME_COMMAND} called with invalid arguments");
            return Ok(None);
        };
        let snapshot = self
            .documents
            .get(&uri)
            .map(|doc| (doc.content.to_string(), doc.version));
        let Some((text, version)) = snapshot else {
            return Ok(None);
        };
        let Some(edit) = rename_workspace_edit(uri, version, &text, range) else {
            return Ok(None);
        };

        match self.client.apply_edit(edit).await {
            Ok(response) if !response.applied => {
                warn!("rename edit rejected: {:?}", response.failure_reason);
            }
            Ok(_) => {}
            Err(err) => warn!("rename edit failed: {err}"),
        }
        Ok(None)
    }

    async fn goto_definition(&self, params: GotoDefinitionParams) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = from_lsp_position(params.text_document_position_params.position);

        let definition = self
            .analyses
            .get(uri)
            .and_then(|analysis| analysis.symbols.definition_at(position));
        Ok(definition.map(|span| GotoDefinitionResponse::Scalar(Location::new(uri.clone(), to_lsp_range(span)))))
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let uri = &params.text_document.uri;
        let Some(content) = self.documents.get(uri).map(|doc| doc.content.to_string()) else {
            return Ok(None);
        };
        let settings = self.document_settings(uri).await;
        let hints = compute_inlay_hints(&content, params.range, settings.opcode_table());
        Ok((!hints.is_empty()).then_some(hints))
    }
}
