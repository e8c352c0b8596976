//! `launch.json` document model and the executable guesser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version VS Code expects in `launch.json`.
pub const LAUNCH_VERSION: &str = "0.2.0";

/// Editor variable expanded to the workspace folder.
pub const WORKSPACE_ROOT: &str = "${workspaceRoot}";

/// Argument added for test binaries so gtest keeps its colors in the
/// debug console.
pub const GTEST_COLOR_FLAG: &str = "--gtest_color=yes";

const NON_EXECUTABLE_TARGETS: [&str; 3] = ["test", "all", "clean"];
// `.so` is not listed, so shared objects on Linux are taken for executables.
const LIBRARY_SUFFIXES: [&str; 2] = [".dylib", ".dll"];
const TEST_SUFFIXES: [&str; 4] = ["test", "tests", "Test", "Tests"];

/// Top-level `launch.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDocument {
    pub version: String,
    pub configurations: Vec<LaunchConfig>,
}

impl LaunchDocument {
    pub fn new(configurations: Vec<LaunchConfig>) -> Self {
        Self {
            version: LAUNCH_VERSION.to_string(),
            configurations,
        }
    }
}

/// One debugger launch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Display name, the target itself.
    pub name: String,
    /// Debugger type.
    #[serde(rename = "type")]
    pub kind: String,
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: String,
    pub request: String,
}

/// Keeps the targets that look like executables, in order.
pub fn guess_executables(targets: &[String]) -> Vec<&str> {
    targets
        .iter()
        .map(String::as_str)
        .filter(|target| is_executable(target))
        .collect()
}

fn is_executable(target: &str) -> bool {
    !NON_EXECUTABLE_TARGETS.contains(&target)
        && !LIBRARY_SUFFIXES.iter().any(|suffix| target.ends_with(suffix))
}

fn is_test(target: &str) -> bool {
    TEST_SUFFIXES.iter().any(|suffix| target.ends_with(suffix))
}

/// Builds the lldb launch entry for the binary `target` produced in
/// `<build_path>/bin`.
pub fn launch_config(build_path: &str, target: &str) -> LaunchConfig {
    let mut args = Vec::new();
    if is_test(target) {
        args.push(GTEST_COLOR_FLAG.to_string());
    }
    let mut env = BTreeMap::new();
    env.insert(
        "DYLD_LIBRARY_PATH".to_string(),
        format!("{}/{}/lib", WORKSPACE_ROOT, build_path),
    );
    LaunchConfig {
        name: target.to_string(),
        kind: "lldb".to_string(),
        program: format!("{}/{}/bin/{}", WORKSPACE_ROOT, build_path, target),
        args,
        env,
        cwd: WORKSPACE_ROOT.to_string(),
        request: "launch".to_string(),
    }
}
