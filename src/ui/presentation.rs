//! Rich presentation hooks.
//!
//! Front ends that can show progress, diffs or editor integrations implement
//! these. Every hook defaults to doing nothing, so the plain console only has
//! to name the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UiSource;

/// Progress of one task in the current plan.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProgress {
    pub index: usize,
    pub n_tasks: usize,
    pub description: String,
    pub source: String,
    pub status: String,
    #[serde(default = "default_source_index")]
    pub source_index: usize,
    #[serde(default)]
    pub tasks: Vec<Value>,
}

fn default_source_index() -> usize {
    1
}

/// Progress of one step within a task.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepProgress {
    pub index: usize,
    pub n_steps: usize,
    pub step: Value,
    pub task_source: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifiedFile {
    pub path: String,
    pub name: String,
    pub status: String,
}

/// Before/after contents of a file change.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    pub file_path: String,
    pub file_old: String,
    pub file_new: String,
    #[serde(default)]
    pub n_new_lines: usize,
    #[serde(default)]
    pub n_del_lines: usize,
}

#[allow(dead_code)]
#[async_trait]
pub trait RichPresentation: Send {
    async fn send_project_stage(&mut self, _data: &Value) {}

    async fn send_epics_and_tasks(&mut self, _epics: &[Value], _tasks: &[Value]) {}

    async fn send_task_progress(&mut self, _progress: &TaskProgress) {}

    async fn send_step_progress(&mut self, _progress: &StepProgress) {}

    async fn send_modified_files(&mut self, _files: &[ModifiedFile]) {}

    async fn send_data_about_logs(&mut self, _data: &Value) {}

    async fn send_run_command(&mut self, _run_command: &str) {}

    async fn send_app_link(&mut self, _app_link: &str) {}

    async fn open_editor(&mut self, _file: &str, _line: Option<usize>) {}

    async fn send_project_root(&mut self, _path: &str) {}

    async fn send_project_stats(&mut self, _stats: &Value) {}

    async fn send_test_instructions(&mut self, _instructions: &str) {}

    async fn knowledge_base_update(&mut self, _knowledge_base: &Value) {}

    async fn send_file_status(
        &mut self,
        _file_path: &str,
        _status: &str,
        _source: Option<&UiSource>,
    ) {
    }

    async fn send_bug_hunter_status(&mut self, _status: &str, _num_cycles: usize) {}

    async fn generate_diff(&mut self, _diff: &FileDiff, _source: Option<&UiSource>) {}

    async fn stop_app(&mut self) {}

    async fn close_diff(&mut self) {}

    async fn loading_finished(&mut self) {}

    async fn send_project_description(&mut self, _description: &str) {}

    async fn send_features_list(&mut self, _features: &[String]) {}

    async fn import_project(&mut self, _project_dir: &str) {}

    async fn start_important_stream(&mut self) {}

    async fn start_breakdown_stream(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_progress_defaults() {
        let progress: TaskProgress = serde_json::from_value(json!({
            "index": 2,
            "n_tasks": 5,
            "description": "Add login form",
            "source": "app",
            "status": "in_progress"
        }))
        .unwrap();
        assert_eq!(progress.source_index, 1);
        assert!(progress.tasks.is_empty());
    }

    #[test]
    fn test_file_diff_defaults() {
        let diff: FileDiff = serde_json::from_value(json!({
            "file_path": "src/app.js",
            "file_old": "",
            "file_new": "console.log(1)"
        }))
        .unwrap();
        assert_eq!(diff.n_new_lines, 0);
        assert_eq!(diff.n_del_lines, 0);
    }
}
