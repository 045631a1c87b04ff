//! MCP server for agents working on a project.
//!
//! Tools run the configured test, lint and format commands, keep task and
//! learning files under the agents directory and instantiate file
//! templates. Every caller-supplied path is confined to the project root.

use crate::commands::{self, CommandOutput};
use crate::error::DevError;
use crate::learnings::LearningStore;
use crate::paths::resolve_within;
use crate::tasks::TaskStore;
use crate::templates::{Instantiated, TemplateStore};
use crate::types::{
    AddLearningParams, AddTaskParams, CodeReviewArgs, CompleteTaskParams,
    CreateFromTemplateParams, FileResult, FormatCodeParams, ImplementFeatureArgs,
    ListTasksParams, RunLintParams, RunTestsParams, TaskList,
};
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
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tui_core::ProjectConfig;

const CARGO_URI: &str = "config://cargo";
const AGENTS_URI: &str = "docs://agents";
const AGENTS_PREFIX: &str = "docs://agents/";
const TASKS_URI: &str = "tasks://list";
const LEARNINGS_URI: &str = "learnings://all";
const AGENTS_FILE: &str = "AGENTS.md";

/// MCP server exposing project development tools.
///
/// # Examples
///
/// ```no_run
/// use dev_server::ProjectDevService;
/// use tui_core::ProjectConfig;
///
/// let service = ProjectDevService::new(ProjectConfig::default()).unwrap();
/// // Service implements rmcp ServerHandler trait
/// ```
#[derive(Clone)]
pub struct ProjectDevService {
    /// Canonical project root
    root: PathBuf,

    /// Commands and layout
    project: ProjectConfig,

    tasks: TaskStore,
    learnings: LearningStore,
    templates: TemplateStore,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,

    /// Prompt router for MCP protocol
    prompt_router: PromptRouter<Self>,
}

impl fmt::Debug for ProjectDevService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectDevService")
            .field("root", &self.root)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

impl ProjectDevService {
    /// Creates a service for the project described by `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project root does not exist, or if the agents
    /// directory lies outside it.
    pub fn new(project: ProjectConfig) -> crate::error::Result<Self> {
        let root = fs::canonicalize(&project.root).map_err(|e| {
            DevError::io(
                format!("failed to resolve project root {}", project.root.display()),
                e,
            )
        })?;
        let agents = resolve_within(&root, &project.agents_dir.to_string_lossy())?;
        debug!(root = %root.display(), agents = %agents.display(), "project layout");

        Ok(Self {
            tasks: TaskStore::new(agents.join("tasks")),
            learnings: LearningStore::new(agents.join("learnings")),
            templates: TemplateStore::new(agents.join("templates")),
            root,
            project,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        })
    }

    /// Canonical project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resources listed to clients.
    #[must_use]
    pub fn resource_entries() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
        vec![
            (CARGO_URI, "Cargo.toml", "Project manifest", "text/plain"),
            (AGENTS_URI, "AGENTS.md", "Project-wide agent rules", "text/markdown"),
            (TASKS_URI, "Tasks", "All tasks as JSON", "application/json"),
            (LEARNINGS_URI, "Learnings", "All project learnings", "text/markdown"),
        ]
    }

    /// Text of the resource at `uri`.
    ///
    /// `docs://agents/{path}` reads `{path}/AGENTS.md` below the root.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` for paths outside the root and
    /// `resource_not_found` for unknown URIs.
    pub fn read_resource_text(&self, uri: &str) -> std::result::Result<String, McpError> {
        match uri {
            CARGO_URI => Ok(read_or(&self.root.join("Cargo.toml"), "# Cargo.toml not found")),
            AGENTS_URI => Ok(read_or(&self.root.join(AGENTS_FILE), "# AGENTS.md not found")),
            TASKS_URI => {
                let list = self.task_list(None).map_err(to_mcp_error)?;
                to_pretty_json(&list)
            }
            LEARNINGS_URI => self.learnings.all().map_err(to_mcp_error),
            other => {
                let Some(path) = other.strip_prefix(AGENTS_PREFIX) else {
                    return Err(McpError::resource_not_found(
                        format!("Unknown resource: {other}"),
                        None,
                    ));
                };
                let dir = resolve_within(&self.root, path).map_err(to_mcp_error)?;
                Ok(read_or(
                    &dir.join(AGENTS_FILE),
                    &format!("# AGENTS.md not found at {path}"),
                ))
            }
        }
    }

    fn task_list(&self, status: Option<&str>) -> crate::error::Result<TaskList> {
        let tasks = self.tasks.list(status)?;
        Ok(TaskList {
            count: tasks.len(),
            tasks,
        })
    }

    async fn run_command<I>(
        &self,
        purpose: &'static str,
        command: &[String],
        extra: I,
    ) -> std::result::Result<CallToolResult, McpError>
    where
        I: IntoIterator<Item = String>,
    {
        let output: CommandOutput = commands::run(purpose, command, extra, &self.root)
            .await
            .map_err(to_mcp_error)?;
        json_result(&output)
    }

    /// Path relative to the root when possible, for reporting.
    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[tool_router]
impl ProjectDevService {
    #[tool(
        description = "Run the project's test command. An optional path or filter is appended as the last argument."
    )]
    async fn run_tests(
        &self,
        Parameters(params): Parameters<RunTestsParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.run_command("tests", &self.project.test_command, params.path)
            .await
    }

    #[tool(description = "Run the project's linter, optionally applying automatic fixes.")]
    async fn run_lint(
        &self,
        Parameters(params): Parameters<RunLintParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let extra = params.fix.then(|| self.project.lint_fix_flag.clone());
        self.run_command("lint", &self.project.lint_command, extra)
            .await
    }

    #[tool(
        description = "Format the project, or one file when a path relative to the project root is given."
    )]
    async fn format_code(
        &self,
        Parameters(params): Parameters<FormatCodeParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let extra = match params.path.as_deref() {
            Some(path) => {
                let file = resolve_within(&self.root, path).map_err(to_mcp_error)?;
                vec!["--".to_string(), file.display().to_string()]
            }
            None => Vec::new(),
        };
        self.run_command("format", &self.project.format_command, extra)
            .await
    }

    #[tool(description = "List tasks, optionally only those with a given status.")]
    async fn list_tasks(
        &self,
        Parameters(params): Parameters<ListTasksParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let list = self
            .task_list(params.status.as_deref())
            .map_err(to_mcp_error)?;
        json_result(&list)
    }

    #[tool(description = "Create a pending task with a title and optional description.")]
    async fn add_task(
        &self,
        Parameters(params): Parameters<AddTaskParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let task = self
            .tasks
            .add(&params.title, params.description.as_deref())
            .map_err(to_mcp_error)?;
        json_result(&FileResult {
            file: Some(self.display(&task.file)),
            task_id: Some(task.task_id),
            ..FileResult::ok()
        })
    }

    #[tool(description = "Mark a task as completed.")]
    async fn complete_task(
        &self,
        Parameters(params): Parameters<CompleteTaskParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let found = self
            .tasks
            .complete(&params.task_id)
            .map_err(to_mcp_error)?;

        let result = if found {
            FileResult {
                task_id: Some(params.task_id),
                status: Some("completed".to_string()),
                ..FileResult::ok()
            }
        } else {
            FileResult::failed(format!("Task not found: {}", params.task_id))
        };
        json_result(&result)
    }

    #[tool(
        description = "Record a learning (category such as patterns, gotchas, decisions or tips) for future sessions."
    )]
    async fn add_learning(
        &self,
        Parameters(params): Parameters<AddLearningParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let file = self
            .learnings
            .add(&params.category, &params.title, &params.content)
            .map_err(to_mcp_error)?;
        json_result(&FileResult {
            file: Some(self.display(&file)),
            category: Some(params.category),
            ..FileResult::ok()
        })
    }

    #[tool(
        description = "Create a file from a template, substituting {{name}} placeholders. Never overwrites an existing file."
    )]
    async fn create_from_template(
        &self,
        Parameters(params): Parameters<CreateFromTemplateParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let destination =
            resolve_within(&self.root, &params.destination).map_err(to_mcp_error)?;
        let outcome = self
            .templates
            .instantiate(&params.template, &destination, &params.variables)
            .map_err(to_mcp_error)?;

        let result = match outcome {
            Instantiated::Created(file) => FileResult {
                file: Some(self.display(&file)),
                template: Some(params.template),
                ..FileResult::ok()
            },
            Instantiated::TemplateNotFound(available) => FileResult {
                available: Some(available),
                ..FileResult::failed(format!("Template not found: {}", params.template))
            },
            Instantiated::DestinationExists => FileResult::failed(format!(
                "Destination already exists: {}",
                params.destination
            )),
        };
        json_result(&result)
    }
}

#[prompt_router]
impl ProjectDevService {
    #[prompt(name = "code_review", description = "Review code against project standards.")]
    async fn code_review(
        &self,
        Parameters(args): Parameters<CodeReviewArgs>,
    ) -> Vec<PromptMessage> {
        let text = format!(
            "Review this code against our project standards.\n\n\
             ## Project Standards\n\n\
             - Public items carry doc comments with `# Errors` sections where they return `Result`\n\
             - Naming follows Rust conventions (snake_case functions, CamelCase types)\n\
             - Errors propagate with `?`; no `unwrap()` or `expect()` outside tests\n\
             - Operational output goes through `tracing`, never `println!`\n\
             - Clippy pedantic passes without new `allow`s\n\n\
             ## Code to Review\n\n```rust\n{}\n```\n\n\
             ## Your Review\n\n\
             Provide specific, actionable feedback covering:\n\
             1. Error handling\n\
             2. Naming\n\
             3. Documentation\n\
             4. Ownership and borrowing\n\
             5. Potential bugs\n",
            args.code
        );
        vec![PromptMessage::new_text(PromptMessageRole::User, text)]
    }

    #[prompt(name = "implement_feature", description = "Guide for implementing a new feature.")]
    async fn implement_feature(
        &self,
        Parameters(args): Parameters<ImplementFeatureArgs>,
    ) -> Vec<PromptMessage> {
        let text = format!(
            "I need to implement a new feature in this project.\n\n\
             ## Feature Description\n\n{}\n\n\
             ## Implementation Guide\n\n\
             1. **Understand the requirements**: inputs, outputs and edge cases.\n\
             2. **Find the affected crates and modules**, and any new ones needed.\n\
             3. **Plan the order of changes** and the types that cross crate boundaries.\n\
             4. **Write the code** following AGENTS.md, with doc comments and `Result` errors.\n\
             5. **Add tests** next to the code and under `tests/`, then run `run_tests` and `run_lint`.\n\n\
             Start by analyzing the requirements and proposing an implementation plan.\n",
            args.description
        );
        vec![PromptMessage::new_text(PromptMessageRole::User, text)]
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for ProjectDevService {
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
                "Development tools for this project: run tests, lint and format; \
                 track tasks and learnings under the agents directory; create files \
                 from templates. Paths are relative to the project root."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        let resources = Self::resource_entries()
            .into_iter()
            .map(|(uri, name, description, mime_type)| {
                let mut raw = RawResource::new(uri, name);
                raw.description = Some(description.to_string());
                raw.mime_type = Some(mime_type.to_string());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        let uri = request.uri;
        let text = self.read_resource_text(&uri)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn read_or(path: &Path, fallback: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| fallback.to_string())
}

fn to_pretty_json<T: Serialize>(value: &T) -> std::result::Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {e}"), None))
}

fn json_result<T: Serialize>(value: &T) -> std::result::Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(to_pretty_json(
        value,
    )?)]))
}

pub(crate) fn to_mcp_error(error: DevError) -> McpError {
    if error.is_invalid_input() {
        McpError::invalid_params(error.to_string(), None)
    } else {
        McpError::internal_error(error.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn project(temp: &TempDir) -> ProjectConfig {
        ProjectConfig {
            root: temp.path().to_path_buf(),
            ..ProjectConfig::default()
        }
    }

    fn service(temp: &TempDir) -> ProjectDevService {
        ProjectDevService::new(project(temp)).unwrap()
    }

    fn parse<T: serde::de::DeserializeOwned>(
        result: std::result::Result<CallToolResult, McpError>,
    ) -> T {
        let result = result.unwrap();
        let text = result.content[0].as_text().unwrap();
        serde_json::from_str(&text.text).unwrap()
    }

    #[test]
    fn test_get_info() {
        let temp = TempDir::new().unwrap();
        let info = service(&temp).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[test]
    fn test_missing_root_rejected() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            root: temp.path().join("missing"),
            ..ProjectConfig::default()
        };
        assert!(matches!(
            ProjectDevService::new(config),
            Err(DevError::Io { .. })
        ));
    }

    #[test]
    fn test_agents_dir_confined() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            agents_dir: PathBuf::from("../elsewhere"),
            ..project(&temp)
        };
        assert!(matches!(
            ProjectDevService::new(config),
            Err(DevError::OutsideRoot { .. })
        ));
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let empty: TaskList = parse(service.list_tasks(Parameters(ListTasksParams::default())).await);
        assert_eq!(empty.count, 0);

        let created: FileResult = parse(
            service
                .add_task(Parameters(AddTaskParams {
                    title: "Write docs".to_string(),
                    description: Some("All public items.".to_string()),
                }))
                .await,
        );
        assert!(created.success);
        let task_id = created.task_id.unwrap();
        assert!(created.file.unwrap().starts_with(".agents/tasks/"));

        let pending: TaskList = parse(
            service
                .list_tasks(Parameters(ListTasksParams {
                    status: Some("pending".to_string()),
                }))
                .await,
        );
        assert_eq!(pending.count, 1);
        assert_eq!(pending.tasks[0]["title"], "Write docs");

        let completed: FileResult = parse(
            service
                .complete_task(Parameters(CompleteTaskParams {
                    task_id: task_id.clone(),
                }))
                .await,
        );
        assert!(completed.success);
        assert_eq!(completed.status.as_deref(), Some("completed"));

        let json = service.read_resource_text(TASKS_URI).unwrap();
        let listed: TaskList = serde_json::from_str(&json).unwrap();
        assert_eq!(listed.tasks[0]["status"], "completed");
    }

    #[tokio::test]
    async fn test_complete_unknown_and_invalid_task() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let missing: FileResult = parse(
            service
                .complete_task(Parameters(CompleteTaskParams {
                    task_id: "20990101_000000".to_string(),
                }))
                .await,
        );
        assert!(!missing.success);
        assert_eq!(
            missing.error.as_deref(),
            Some("Task not found: 20990101_000000")
        );

        let err = service
            .complete_task(Parameters(CompleteTaskParams {
                task_id: "../../Cargo".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_learnings() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert_eq!(
            service.read_resource_text(LEARNINGS_URI).unwrap(),
            "# No learnings yet"
        );

        let result: FileResult = parse(
            service
                .add_learning(Parameters(AddLearningParams {
                    category: "tips".to_string(),
                    title: "Prefer BTreeMap".to_string(),
                    content: "Deterministic output.".to_string(),
                }))
                .await,
        );
        assert_eq!(
            result.file.as_deref(),
            Some(".agents/learnings/prefer-btreemap.md")
        );
        assert_eq!(result.category.as_deref(), Some("tips"));

        let all = service.read_resource_text(LEARNINGS_URI).unwrap();
        assert!(all.contains("Deterministic output."));
    }

    #[tokio::test]
    async fn test_create_from_template() {
        let temp = TempDir::new().unwrap();
        let templates = temp.path().join(".agents/templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("crate.md"), "# {{name}}\n").unwrap();
        let service = service(&temp);

        let params = |destination: &str| CreateFromTemplateParams {
            template: "crate.md".to_string(),
            destination: destination.to_string(),
            variables: BTreeMap::from([("name".to_string(), "parser".to_string())]),
        };

        let created: FileResult =
            parse(service.create_from_template(Parameters(params("docs/parser.md"))).await);
        assert!(created.success);
        assert_eq!(created.file.as_deref(), Some("docs/parser.md"));
        assert_eq!(
            fs::read_to_string(temp.path().join("docs/parser.md")).unwrap(),
            "# parser\n"
        );

        let exists: FileResult =
            parse(service.create_from_template(Parameters(params("docs/parser.md"))).await);
        assert!(!exists.success);

        let missing: FileResult = parse(
            service
                .create_from_template(Parameters(CreateFromTemplateParams {
                    template: "nope.md".to_string(),
                    ..params("docs/other.md")
                }))
                .await,
        );
        assert_eq!(missing.available, Some(vec!["crate.md".to_string()]));

        let err = service
            .create_from_template(Parameters(params("../escape.md")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(!temp.path().parent().unwrap().join("escape.md").exists());
    }

    #[test]
    fn test_document_resources() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert_eq!(
            service.read_resource_text(CARGO_URI).unwrap(),
            "# Cargo.toml not found"
        );

        fs::write(temp.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
        fs::write(temp.path().join("AGENTS.md"), "# Rules\n").unwrap();
        fs::create_dir_all(temp.path().join("crates/core")).unwrap();
        fs::write(temp.path().join("crates/core/AGENTS.md"), "# Core rules\n").unwrap();

        assert!(service.read_resource_text(CARGO_URI).unwrap().contains("demo"));
        assert_eq!(service.read_resource_text(AGENTS_URI).unwrap(), "# Rules\n");
        assert_eq!(
            service
                .read_resource_text("docs://agents/crates/core")
                .unwrap(),
            "# Core rules\n"
        );
        assert_eq!(
            service.read_resource_text("docs://agents/src").unwrap(),
            "# AGENTS.md not found at src"
        );

        let err = service
            .read_resource_text("docs://agents/../..")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        let err = service.read_resource_text("tasks://other").unwrap_err();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_commands_use_configuration() {
        let temp = TempDir::new().unwrap();
        let sh = |script: &str| vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        let config = ProjectConfig {
            test_command: sh("echo \"test $0\""),
            lint_command: sh("echo \"lint $0\"; exit 1"),
            lint_fix_flag: "--apply".to_string(),
            format_command: sh("echo \"format $0 $1\""),
            ..project(&temp)
        };
        let service = ProjectDevService::new(config).unwrap();

        let tests: CommandOutput = parse(
            service
                .run_tests(Parameters(RunTestsParams {
                    path: Some("parser".to_string()),
                }))
                .await,
        );
        assert!(tests.success);
        assert_eq!(tests.stdout, "test parser\n");

        let lint: CommandOutput =
            parse(service.run_lint(Parameters(RunLintParams { fix: true })).await);
        assert!(!lint.success);
        assert_eq!(lint.exit_code, 1);
        assert_eq!(lint.stdout, "lint --apply\n");

        let format: CommandOutput = parse(
            service
                .format_code(Parameters(FormatCodeParams {
                    path: Some("src/lib.rs".to_string()),
                }))
                .await,
        );
        let file = service.root().join("src/lib.rs").display().to_string();
        assert!(format.stdout.starts_with("format "));
        assert!(format.stdout.trim_end().ends_with(&file), "{}", format.stdout);

        let err = service
            .format_code(Parameters(FormatCodeParams {
                path: Some("/etc/passwd".to_string()),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_prompts_embed_arguments() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let review = service
            .code_review(Parameters(CodeReviewArgs {
                code: "fn main() {}".to_string(),
            }))
            .await;
        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("fn main() {}"));
        assert!(json.contains("Project Standards"));

        let feature = service
            .implement_feature(Parameters(ImplementFeatureArgs {
                description: "Add a --watch flag".to_string(),
            }))
            .await;
        assert_eq!(feature.len(), 1);
        assert!(serde_json::to_string(&feature).unwrap().contains("Add a --watch flag"));
    }
}
