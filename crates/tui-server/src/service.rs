//! MCP server implementation for building terminal applications.
//!
//! The `TuiBuilderService` exposes four groups of tools:
//! 1. Reference: `list_widgets`, `list_containers`
//! 2. Generation: `generate_widget`, `generate_screen`, `generate_app`,
//!    `generate_test_cases`
//! 3. Validation: `validate_css`, `lint_widget`, `check_accessibility`
//! 4. Sessions: `run_app_pilot`, `take_snapshot`, `simulate_keys`,
//!    `simulate_click`, `drive_session`, `compare_snapshots`
//!
//! Reference pages are served as `tui://` resources and guided workflows
//! as prompts.

use crate::docs::{self, ComponentDoc};
use crate::generate::{self, Generator};
use crate::resources;
use crate::types::{
    CompareSnapshotsParams, ComponentList, DriveSessionParams, GenerateAppParams,
    GenerateScreenParams, GenerateWidgetParams, GeneratedSource, InspectSourceParams,
    SimulateClickParams, SimulateKeysParams, SourceParams, ValidateCssParams,
};
use crate::validate;
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult,
    PaginatedRequestParam, PromptMessage, PromptMessageRole, ProtocolVersion, RawResource,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{
    ErrorData as McpError, prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use tui_core::{Error, SessionResult};
use tui_harness::session::{Harness, SessionOptions};

/// MCP server for designing, generating and test-driving terminal
/// applications.
///
/// # Examples
///
/// ```no_run
/// use tui_harness::session::SessionOptions;
/// use tui_server::service::TuiBuilderService;
///
/// let service = TuiBuilderService::new(SessionOptions::default()).unwrap();
/// // Service implements rmcp ServerHandler trait
/// ```
#[derive(Clone)]
pub struct TuiBuilderService {
    /// Options every session starts from
    options: SessionOptions,

    /// Template renderer
    generator: Arc<Generator<'static>>,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,

    /// Prompt router for MCP protocol
    prompt_router: PromptRouter<Self>,
}

impl fmt::Debug for TuiBuilderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TuiBuilderService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TuiBuilderService {
    /// Creates a service whose sessions run with `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(options: SessionOptions) -> tui_core::Result<Self> {
        Ok(Self {
            options,
            generator: Arc::new(Generator::new()?),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        })
    }

    /// Runs one session on the blocking pool.
    async fn session<F>(&self, entry: Option<String>, run: F) -> Result<CallToolResult, McpError>
    where
        F: FnOnce(&Harness) -> SessionResult + Send + 'static,
    {
        let mut options = self.options.clone();
        if entry.is_some() {
            options.entry = entry;
        }
        let harness = Harness::new(options);

        let result = tokio::task::spawn_blocking(move || run(&harness))
            .await
            .map_err(|e| McpError::internal_error(format!("Session task failed: {e}"), None))?;

        debug!(success = result.success, "session finished");
        json_result(&result)
    }
}

#[tool_router]
impl TuiBuilderService {
    /// Lists the built-in widgets.
    #[tool(description = "List the built-in widgets with a one-line description of each.")]
    async fn list_widgets(&self) -> Result<CallToolResult, McpError> {
        json_result(&component_list(docs::widgets()))
    }

    /// Lists the built-in containers.
    #[tool(description = "List the built-in layout containers with a one-line description of each.")]
    async fn list_containers(&self) -> Result<CallToolResult, McpError> {
        json_result(&component_list(docs::containers()))
    }

    #[tool(
        description = "Generate a custom widget declaration that extends a built-in widget. Optionally includes CSS and an example key binding."
    )]
    async fn generate_widget(
        &self,
        Parameters(params): Parameters<GenerateWidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let source = self
            .generator
            .widget(
                &params.name,
                &params.widget_type,
                params.with_css,
                params.with_bindings,
            )
            .map_err(to_mcp_error)?;
        generated(&params.name, source)
    }

    #[tool(
        description = "Generate a screen declaration, optionally modal, with or without header and footer."
    )]
    async fn generate_screen(
        &self,
        Parameters(params): Parameters<GenerateScreenParams>,
    ) -> Result<CallToolResult, McpError> {
        let source = self
            .generator
            .screen(&params.name, params.modal, params.with_header_footer)
            .map_err(to_mcp_error)?;
        generated(&params.name, source)
    }

    /// Generates a complete application source.
    ///
    /// The result runs as-is with `run_app_pilot`.
    #[tool(
        description = "Generate a complete application source with quit and dark mode bindings. Options add a settings screen and a sidebar layout."
    )]
    async fn generate_app(
        &self,
        Parameters(params): Parameters<GenerateAppParams>,
    ) -> Result<CallToolResult, McpError> {
        let source = self
            .generator
            .app(&params.name, params.with_screens, params.with_sidebar)
            .map_err(to_mcp_error)?;
        generated(&params.name, source)
    }

    #[tool(
        description = "Check CSS for balanced braces (error) and unknown property names (warnings)."
    )]
    async fn validate_css(
        &self,
        Parameters(params): Parameters<ValidateCssParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&validate::validate_css(&params.css))
    }

    #[tool(
        description = "Lint a widget or app declaration: requires a class, and warns when the description or child widgets are missing."
    )]
    async fn lint_widget(
        &self,
        Parameters(params): Parameters<InspectSourceParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&validate::lint_widget(&params.source))
    }

    #[tool(description = "Warn when a source declares no keyboard bindings.")]
    async fn check_accessibility(
        &self,
        Parameters(params): Parameters<InspectSourceParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&validate::check_accessibility(&params.source))
    }

    /// Starts the application headlessly and captures its first render.
    #[tool(
        description = "Run an application source on a virtual terminal and return the text it renders. Failures are reported in the result, never raised."
    )]
    async fn run_app_pilot(
        &self,
        Parameters(params): Parameters<SourceParams>,
    ) -> Result<CallToolResult, McpError> {
        let SourceParams { source, entry } = params;
        self.session(entry, move |harness| harness.run_app_pilot(&source))
            .await
    }

    #[tool(description = "Capture the initial render of an application as a text snapshot.")]
    async fn take_snapshot(
        &self,
        Parameters(params): Parameters<SourceParams>,
    ) -> Result<CallToolResult, McpError> {
        let SourceParams { source, entry } = params;
        self.session(entry, move |harness| harness.take_snapshot(&source))
            .await
    }

    #[tool(
        description = "Press keys in order (e.g. [\"tab\", \"enter\", \"q\"]) and return the rendered text afterwards."
    )]
    async fn simulate_keys(
        &self,
        Parameters(params): Parameters<SimulateKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let SimulateKeysParams {
            source,
            keys,
            entry,
        } = params;
        self.session(entry, move |harness| harness.simulate_keys(&source, &keys))
            .await
    }

    #[tool(
        description = "Click the widget matched by a selector (e.g. \"#submit\") and return the rendered text afterwards."
    )]
    async fn simulate_click(
        &self,
        Parameters(params): Parameters<SimulateClickParams>,
    ) -> Result<CallToolResult, McpError> {
        let SimulateClickParams {
            source,
            selector,
            entry,
        } = params;
        self.session(entry, move |harness| {
            harness.simulate_click(&source, &selector)
        })
        .await
    }

    /// Applies a mixed list of presses and clicks.
    #[tool(
        description = "Apply a sequence of actions ({\"action\": \"press\", \"keys\": [...]} or {\"action\": \"click\", \"selector\": \"...\"}) and return the rendered text."
    )]
    async fn drive_session(
        &self,
        Parameters(params): Parameters<DriveSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        let DriveSessionParams {
            source,
            actions,
            entry,
        } = params;
        self.session(entry, move |harness| {
            tui_harness::drive_session(&source, &actions, harness.options())
        })
        .await
    }

    #[tool(
        description = "Generate an integration test file that drives the application declared in a source."
    )]
    async fn generate_test_cases(
        &self,
        Parameters(params): Parameters<InspectSourceParams>,
    ) -> Result<CallToolResult, McpError> {
        let tests = self
            .generator
            .test_cases(&params.source)
            .map_err(to_mcp_error)?;
        json_result(&GeneratedSource {
            class_name: generate::app_class_name(&params.source)
                .unwrap_or("App")
                .to_string(),
            source: tests,
        })
    }

    #[tool(
        description = "Compare two snapshots exactly. Returns a unified diff labelled expected/actual when they differ."
    )]
    async fn compare_snapshots(
        &self,
        Parameters(params): Parameters<CompareSnapshotsParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&tui_harness::compare_snapshots(
            &params.expected,
            &params.actual,
        ))
    }
}

#[prompt_router]
impl TuiBuilderService {
    #[prompt(name = "design_layout", description = "Guide through designing a layout.")]
    async fn design_layout(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/design_layout.md"))
    }

    #[prompt(name = "create_widget", description = "Step-by-step custom widget creation.")]
    async fn create_widget(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/create_widget.md"))
    }

    #[prompt(name = "design_form", description = "Design a form layout with validation.")]
    async fn design_form(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/design_form.md"))
    }

    #[prompt(name = "debug_layout", description = "Troubleshoot layout problems.")]
    async fn debug_layout(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/debug_layout.md"))
    }

    #[prompt(name = "debug_styling", description = "Fix CSS and styling problems.")]
    async fn debug_styling(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/debug_styling.md"))
    }

    #[prompt(name = "optimize_app", description = "Review an application for a leaner structure.")]
    async fn optimize_app(&self) -> Vec<PromptMessage> {
        user_prompt(include_str!("../prompts/optimize_app.md"))
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for TuiBuilderService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Build terminal applications. Generate sources with generate_app, \
                 generate_screen and generate_widget; check them with validate_css, \
                 lint_widget and check_accessibility; run them headlessly with \
                 run_app_pilot, simulate_keys, simulate_click and drive_session. \
                 Reference pages live under tui:// resources."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = resources::entries()
            .into_iter()
            .map(|entry| {
                let mut raw = RawResource::new(entry.uri, entry.name);
                raw.description = Some(entry.description);
                raw.mime_type = Some("text/markdown".to_string());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;
        let text = resources::read(&uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Unknown resource: {uri}"), None)
        })?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn component_list(registry: &BTreeMap<&'static str, ComponentDoc>) -> ComponentList {
    registry
        .values()
        .map(|doc| (doc.name.to_string(), doc.description.to_string()))
        .collect()
}

fn generated(name: &str, source: String) -> Result<CallToolResult, McpError> {
    let class_name = generate::to_class_name(name).map_err(to_mcp_error)?;
    json_result(&GeneratedSource { class_name, source })
}

fn user_prompt(text: &str) -> Vec<PromptMessage> {
    vec![PromptMessage::new_text(PromptMessageRole::User, text)]
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {e}"), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn to_mcp_error(error: Error) -> McpError {
    match error {
        Error::InvalidArgument(message) => McpError::invalid_params(message, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use tui_core::{ComparisonResult, SessionAction, ValidationResult};

    fn service() -> TuiBuilderService {
        TuiBuilderService::new(SessionOptions::default()).unwrap()
    }

    fn parse<T: serde::de::DeserializeOwned>(result: Result<CallToolResult, McpError>) -> T {
        let result = result.unwrap();
        let text = result.content[0].as_text().unwrap();
        serde_json::from_str(&text.text).unwrap()
    }

    fn generated_source(result: Result<CallToolResult, McpError>) -> (String, String) {
        let value: serde_json::Value = parse(result);
        (
            value["class_name"].as_str().unwrap().to_string(),
            value["source"].as_str().unwrap().to_string(),
        )
    }

    const COUNTER: &str = r#"
[[app]]
class = "Counter"

[[app.bindings]]
key = "plus"
action = "increment('#count')"

[[app.widgets]]
type = "Digits"
id = "count"
text = "0"

[[app.widgets]]
type = "Button"
id = "reset"
text = "Reset"
on_press = "set_text('#count', '0')"
"#;

    #[test]
    fn test_get_info() {
        let info = service().get_info();
        assert_eq!(info.protocol_version, ProtocolVersion::V_2024_11_05);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_debug_omits_routers() {
        let text = format!("{:?}", service());
        assert!(text.starts_with("TuiBuilderService"));
        assert!(!text.contains("tool_router"));
    }

    #[tokio::test]
    async fn test_list_widgets_and_containers() {
        let service = service();
        let widgets: ComponentList = parse(service.list_widgets().await);
        assert!(widgets.contains_key("Button"));
        assert!(!widgets.contains_key("Horizontal"));

        let containers: ComponentList = parse(service.list_containers().await);
        assert!(containers.contains_key("Horizontal"));
        assert!(!containers.contains_key("Button"));
    }

    #[tokio::test]
    async fn test_generate_widget() {
        let params = GenerateWidgetParams {
            name: "status_bar".to_string(),
            widget_type: "Static".to_string(),
            with_css: true,
            with_bindings: false,
        };
        let (class_name, source) =
            generated_source(service().generate_widget(Parameters(params)).await);
        assert_eq!(class_name, "StatusBar");
        assert!(source.contains("class = \"StatusBar\""));
    }

    #[tokio::test]
    async fn test_generate_widget_invalid_type() {
        let params = GenerateWidgetParams {
            name: "Thing".to_string(),
            widget_type: "DataTable".to_string(),
            with_css: true,
            with_bindings: false,
        };
        let err = service()
            .generate_widget(Parameters(params))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_generate_screen_invalid_name() {
        let params = GenerateScreenParams {
            name: "123".to_string(),
            modal: false,
            with_header_footer: true,
        };
        let err = service()
            .generate_screen(Parameters(params))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_generated_app_runs() {
        let service = service();
        let params = GenerateAppParams {
            name: "my_app".to_string(),
            with_screens: true,
            with_sidebar: false,
        };
        let (class_name, source) = generated_source(service.generate_app(Parameters(params)).await);
        assert_eq!(class_name, "MyApp");

        let result: SessionResult = parse(
            service
                .run_app_pilot(Parameters(SourceParams {
                    source: source.clone(),
                    entry: None,
                }))
                .await,
        );
        assert!(result.success, "{:?}", result.error);
        assert!(result.output.contains("Main Content"));

        let settings: SessionResult = parse(
            service
                .simulate_keys(Parameters(SimulateKeysParams {
                    source,
                    keys: vec!["s".to_string()],
                    entry: None,
                }))
                .await,
        );
        assert!(settings.success, "{:?}", settings.error);
        assert!(settings.output.contains("Settings"));
        assert!(!settings.output.contains("Main Content"));
    }

    #[tokio::test]
    async fn test_validation_tools() {
        let service = service();
        let css: ValidationResult = parse(
            service
                .validate_css(Parameters(ValidateCssParams {
                    css: "Screen { colr: red; }".to_string(),
                }))
                .await,
        );
        assert!(css.valid);
        assert_eq!(css.warnings, ["Unknown CSS property: colr"]);

        let lint: ValidationResult = parse(
            service
                .lint_widget(Parameters(InspectSourceParams {
                    source: "type = \"Static\"".to_string(),
                }))
                .await,
        );
        assert!(!lint.valid);

        let access: ValidationResult = parse(
            service
                .check_accessibility(Parameters(InspectSourceParams {
                    source: COUNTER.to_string(),
                }))
                .await,
        );
        assert!(access.warnings.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_session_tools() {
        let service = service();

        let snapshot: SessionResult = parse(
            service
                .take_snapshot(Parameters(SourceParams {
                    source: COUNTER.to_string(),
                    entry: None,
                }))
                .await,
        );
        assert_eq!(snapshot.output, "0\nReset");

        let keys: SessionResult = parse(
            service
                .simulate_keys(Parameters(SimulateKeysParams {
                    source: COUNTER.to_string(),
                    keys: vec!["plus".to_string(), "plus".to_string()],
                    entry: None,
                }))
                .await,
        );
        assert_eq!(keys.output, "2\nReset");

        let click: SessionResult = parse(
            service
                .simulate_click(Parameters(SimulateClickParams {
                    source: COUNTER.to_string(),
                    selector: "#missing".to_string(),
                    entry: None,
                }))
                .await,
        );
        assert!(!click.success);
        assert!(click.error.unwrap().starts_with("Click failed"));

        let driven: SessionResult = parse(
            service
                .drive_session(Parameters(DriveSessionParams {
                    source: COUNTER.to_string(),
                    actions: vec![
                        SessionAction::press(["plus"]),
                        SessionAction::click("#reset"),
                        SessionAction::press(["plus"]),
                    ],
                    entry: None,
                }))
                .await,
        );
        assert_eq!(driven.output, "1\nReset");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_session_failures_are_results() {
        let result: SessionResult = parse(
            service()
                .run_app_pilot(Parameters(SourceParams {
                    source: "[[app]\n".to_string(),
                    entry: None,
                }))
                .await,
        );
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Syntax error"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_entry_selects_app() {
        let source = format!(
            "{COUNTER}\n[[app]]\nclass = \"Other\"\n\n[[app.widgets]]\ntype = \"Label\"\ntext = \"other\"\n"
        );
        let result: SessionResult = parse(
            service()
                .run_app_pilot(Parameters(SourceParams {
                    source,
                    entry: Some("Other".to_string()),
                }))
                .await,
        );
        assert_eq!(result.output, "other");
    }

    #[tokio::test]
    async fn test_generate_test_cases() {
        let value: serde_json::Value = parse(
            service()
                .generate_test_cases(Parameters(InspectSourceParams {
                    source: COUNTER.to_string(),
                }))
                .await,
        );
        assert_eq!(value["class_name"], "Counter");
        assert!(value["source"].as_str().unwrap().contains("counter.toml"));
    }

    #[tokio::test]
    async fn test_compare_snapshots() {
        let service = service();
        let same: ComparisonResult = parse(
            service
                .compare_snapshots(Parameters(CompareSnapshotsParams {
                    expected: "a".to_string(),
                    actual: "a".to_string(),
                }))
                .await,
        );
        assert!(same.matches);
        assert!(same.diff.is_none());

        let different: ComparisonResult = parse(
            service
                .compare_snapshots(Parameters(CompareSnapshotsParams {
                    expected: "a\n".to_string(),
                    actual: "b\n".to_string(),
                }))
                .await,
        );
        assert!(!different.matches);
        let diff = different.diff.unwrap();
        assert!(diff.contains("--- expected"));
        assert!(diff.contains("+++ actual"));
    }

    #[tokio::test]
    async fn test_prompts() {
        let service = service();
        let messages = service.design_layout().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, PromptMessageRole::User);

        for (messages, heading) in [
            (service.create_widget().await, "# Custom Widget"),
            (service.design_form().await, "# Form Design"),
            (service.debug_layout().await, "# Layout Debugging"),
            (service.debug_styling().await, "# Styling Debugging"),
            (service.optimize_app().await, "# Application Review"),
        ] {
            let json = serde_json::to_string(&messages).unwrap();
            assert!(json.contains(heading), "{heading}");
        }
    }
}
