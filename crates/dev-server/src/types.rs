//! Parameter and result types for the development servers.

use crate::tasks::Task;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters for `run_tests`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RunTestsParams {
    /// Optional test target or name filter appended to the test command
    #[serde(default)]
    pub path: Option<String>,
}

/// Parameters for `run_lint`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RunLintParams {
    /// Apply automatic fixes (default: false)
    #[serde(default)]
    pub fix: bool,
}

/// Parameters for `format_code`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FormatCodeParams {
    /// Optional file to format, relative to the project root
    #[serde(default)]
    pub path: Option<String>,
}

/// Parameters for `list_tasks`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Keep only tasks with this status ("pending", "in_progress", "completed")
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for `add_task`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddTaskParams {
    /// Task title
    pub title: String,

    /// Optional task description
    #[serde(default)]
    pub description: Option<String>,
}

/// Parameters for `complete_task`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompleteTaskParams {
    /// Id of the task to complete
    pub task_id: String,
}

/// Parameters for `add_learning`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddLearningParams {
    /// Category (e.g., "patterns", "gotchas", "decisions", "tips")
    pub category: String,

    /// Short title
    pub title: String,

    /// The learning itself
    pub content: String,
}

/// Parameters for `create_from_template`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateFromTemplateParams {
    /// Template file name in the agents templates directory
    pub template: String,

    /// Destination path, relative to the project root
    pub destination: String,

    /// Values substituted for `{{name}}` placeholders
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Arguments of the `code_review` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CodeReviewArgs {
    /// The code to review
    pub code: String,
}

/// Arguments of the `implement_feature` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ImplementFeatureArgs {
    /// Description of the feature
    pub description: String,
}

/// Result of `list_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskList {
    /// Matching tasks ordered by id
    pub tasks: Vec<Task>,

    /// Number of tasks
    pub count: usize,
}

/// Result of the task, learning and template tools.
///
/// Expected failures (unknown task, missing template, existing destination)
/// are reported with `success == false` and an `error` message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FileResult {
    /// Whether the operation took effect
    pub success: bool,

    /// Task id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// File written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Task status after the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Learning category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Template used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Available template names, when the requested one is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,
}

impl FileResult {
    /// A successful result; fill in the relevant fields.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// A failed result with a message.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Parameters for the starter `hello` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HelloParams {
    /// Name to greet (default: "World")
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    "World".to_string()
}

/// Parameters for the starter `add` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First number
    pub a: i64,

    /// Second number
    pub b: i64,
}
