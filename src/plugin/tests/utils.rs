//! Plugin Test Utilities
//!
//! Test doubles shared across the plugin test modules: a plugin that records
//! every call made to it, and a module loader that serves canned modules
//! instead of opening shared libraries.

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::external::library::ModuleLoader;
use crate::plugin::traits::Plugin;
use crate::plugin::types::{CommandMetadata, CommandResult, TypeDescriptor};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A call observed by a [`RecordingPlugin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute { command: String, args: Vec<String> },
    ListCommands,
}

/// Shared call log, cloned into the plugin so tests keep a handle after boxing
pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Configurable plugin that records calls and returns a canned result
pub struct RecordingPlugin {
    pub name: String,
    pub commands: Vec<CommandMetadata>,
    pub result: CommandResult,
    pub should_panic: bool,
    pub calls: CallLog,
}

impl RecordingPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: vec![CommandMetadata::new("run", "Run the mock")
                .with_parameter("input", TypeDescriptor::string())],
            result: CommandResult::success(format!("{} ran", name)),
            should_panic: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_result(mut self, result: CommandResult) -> Self {
        self.result = result;
        self
    }

    pub fn with_commands(mut self, commands: Vec<CommandMetadata>) -> Self {
        self.commands = commands;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.should_panic = true;
        self
    }

    /// Handle on the call log that survives boxing the plugin
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

impl Plugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute_command(&self, command_name: &str, args: &[String]) -> CommandResult {
        self.calls.lock().unwrap().push(Call::Execute {
            command: command_name.to_string(),
            args: args.to_vec(),
        });
        if self.should_panic {
            panic!("mock plugin exploded");
        }
        self.result.clone()
    }

    fn list_commands(&self) -> Vec<CommandMetadata> {
        self.calls.lock().unwrap().push(Call::ListCommands);
        self.commands.clone()
    }
}

/// Recorded calls of a plugin
pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

/// Canned contents of a fake module file
#[derive(Clone)]
pub enum FakeModule {
    /// Module registering plugins with these names
    Plugins(Vec<String>),
    /// Module that fails to load with this cause
    Broken(String),
}

/// Module loader keyed by file name, recording load order
#[derive(Default)]
pub struct FakeModuleLoader {
    modules: HashMap<String, FakeModule>,
    pub loaded: Arc<Mutex<Vec<String>>>,
}

impl FakeModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, file_name: &str, plugin_names: &[&str]) -> Self {
        self.modules.insert(
            file_name.to_string(),
            FakeModule::Plugins(plugin_names.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn with_broken_module(mut self, file_name: &str, cause: &str) -> Self {
        self.modules
            .insert(file_name.to_string(), FakeModule::Broken(cause.to_string()));
        self
    }
}

impl ModuleLoader for FakeModuleLoader {
    fn load_module(&self, path: &Path) -> PluginResult<Vec<Box<dyn Plugin>>> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.loaded.lock().unwrap().push(file_name.clone());

        match self.modules.get(&file_name) {
            Some(FakeModule::Plugins(names)) => Ok(names
                .iter()
                .map(|name| Box::new(RecordingPlugin::new(name)) as Box<dyn Plugin>)
                .collect()),
            Some(FakeModule::Broken(cause)) => Err(PluginError::LoadError {
                path: path.to_path_buf(),
                cause: cause.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Module file name with the platform library extension
pub fn module_file(stem: &str) -> String {
    format!("{}.{}", stem, std::env::consts::DLL_EXTENSION)
}

/// Create empty files named `names` inside `dir`
pub fn touch_files(dir: &Path, names: &[String]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}
