//! `tasks.json` document model.
//!
//! One shell task per phony target, each invoking `ninja -C <build> <target>`
//! with a problem matcher for GCC/Clang style diagnostics.

use serde::{Deserialize, Serialize};

/// Schema version VS Code expects in `tasks.json`.
pub const TASKS_VERSION: &str = "2.0.0";

/// Matches `path:line:column: warning|error: message`.
pub const DIAGNOSTIC_REGEXP: &str = r"^(.*):(\d+):(\d+):\s+(warning|error):\s+(.*)$";

/// Top-level `tasks.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksDocument {
    pub version: String,
    pub tasks: Vec<BuildTask>,
}

impl TasksDocument {
    pub fn new(tasks: Vec<BuildTask>) -> Self {
        Self {
            version: TASKS_VERSION.to_string(),
            tasks,
        }
    }
}

/// A single build task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTask {
    /// Label shown in the task picker.
    pub label: String,
    pub group: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    pub args: Vec<String>,
    pub problem_matcher: ProblemMatcher,
}

/// Tells the editor how to turn task output into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMatcher {
    pub owner: String,
    pub file_location: Vec<String>,
    pub pattern: ProblemPattern,
}

/// Regular expression plus the capture group index of each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemPattern {
    pub regexp: String,
    pub file: u32,
    pub line: u32,
    pub column: u32,
    pub severity: u32,
    pub message: u32,
}

impl ProblemMatcher {
    /// The C/C++ compiler matcher, with absolute file locations.
    pub fn cpp() -> Self {
        Self {
            owner: "cpp".to_string(),
            file_location: vec!["absolute".to_string()],
            pattern: ProblemPattern {
                regexp: DIAGNOSTIC_REGEXP.to_string(),
                file: 1,
                line: 2,
                column: 3,
                severity: 4,
                message: 5,
            },
        }
    }
}

/// Builds the task that runs ninja for `target` inside `build_path`.
pub fn build_task(target: &str, build_path: &str) -> BuildTask {
    BuildTask {
        label: format!("build {}", target),
        group: "build".to_string(),
        kind: "shell".to_string(),
        command: "ninja".to_string(),
        args: vec!["-C".to_string(), build_path.to_string(), target.to_string()],
        problem_matcher: ProblemMatcher::cpp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn build_task_uses_target_and_build_path() {
        let task = build_task("foo", "out/Debug");
        assert_eq!(task.label, "build foo");
        assert_eq!(task.args, vec!["-C", "out/Debug", "foo"]);
        assert_eq!(task.command, "ninja");
        assert_eq!(task.group, "build");
    }

    #[test]
    fn serializes_vscode_field_names() {
        let task = build_task("app", "build");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({
                "label": "build app",
                "group": "build",
                "type": "shell",
                "command": "ninja",
                "args": ["-C", "build", "app"],
                "problemMatcher": {
                    "owner": "cpp",
                    "fileLocation": ["absolute"],
                    "pattern": {
                        "regexp": "^(.*):(\\d+):(\\d+):\\s+(warning|error):\\s+(.*)$",
                        "file": 1,
                        "line": 2,
                        "column": 3,
                        "severity": 4,
                        "message": 5
                    }
                }
            })
        );
    }

    #[test]
    fn serialized_field_order_matches_editor_schema() {
        let text = serde_json::to_string(&build_task("app", "build")).unwrap();
        let keys = [
            "\"label\"",
            "\"group\"",
            "\"type\"",
            "\"command\"",
            "\"args\"",
            "\"problemMatcher\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|key| text.find(key).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn diagnostic_regexp_captures_compiler_lines() {
        let re = Regex::new(DIAGNOSTIC_REGEXP).unwrap();
        let caps = re
            .captures("/src/main.cpp:12:7: error: expected ';' after expression")
            .unwrap();
        assert_eq!(&caps[1], "/src/main.cpp");
        assert_eq!(&caps[2], "12");
        assert_eq!(&caps[3], "7");
        assert_eq!(&caps[4], "error");
        assert_eq!(&caps[5], "expected ';' after expression");
        assert!(!re.is_match("/src/main.cpp:12:7: note: declared here"));
    }

    #[test]
    fn document_carries_schema_version() {
        let doc = TasksDocument::new(Vec::new());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "version": "2.0.0", "tasks": [] })
        );
    }
}
