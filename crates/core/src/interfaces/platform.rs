use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::{error::Result, launch::LaunchDescriptor};

/// Turns a finished launch descriptor into a concrete platform invocation
///
/// One implementation per runtime engine; the engine core stays agnostic of
/// how a platform consumes the descriptor.
pub trait PlatformBuilder {
    fn name(&self) -> &'static str;

    fn prepare(&self, descriptor: &LaunchDescriptor) -> Result<PlatformCommand>;
}

/// A fully rendered platform invocation
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub env: Vec<(String, String)>,
}

impl PlatformCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: String) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    pub fn execute(&self) -> io::Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd.status()
    }
}

/// Default platform: renders a `java` invocation that boots the runtime main
/// class with the descriptor's VM arguments, properties, and classpath, and
/// passes each bundle as a positional `location@options` argument
#[derive(Debug, Clone)]
pub struct JavaPlatform {
    pub java_home: Option<PathBuf>,
    pub main_class: String,
}

impl Default for JavaPlatform {
    fn default() -> Self {
        Self {
            java_home: None,
            main_class: "org.modrun.boot.Main".to_string(),
        }
    }
}

impl JavaPlatform {
    fn java_executable(&self) -> String {
        match &self.java_home {
            Some(home) => home.join("bin").join("java").display().to_string(),
            None => "java".to_string(),
        }
    }
}

impl PlatformBuilder for JavaPlatform {
    fn name(&self) -> &'static str {
        "java"
    }

    fn prepare(&self, descriptor: &LaunchDescriptor) -> Result<PlatformCommand> {
        let mut args = descriptor.vm_arguments.clone();

        for (key, value) in &descriptor.system_properties {
            args.push(format!("-D{key}={value}"));
        }

        if !descriptor.classpath.is_empty() {
            let separator = if cfg!(windows) { ";" } else { ":" };
            let joined = descriptor
                .classpath
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(separator);
            args.push("-cp".to_string());
            args.push(joined);
        }

        args.push(self.main_class.clone());

        for bundle in &descriptor.bundles {
            let mut arg = bundle.location.to_string();
            if let Some(level) = bundle.start_level {
                arg.push_str(&format!("@{level}"));
            }
            if bundle.should_start == Some(false) {
                arg.push_str("@nostart");
            }
            if bundle.should_update == Some(true) {
                arg.push_str("@update");
            }
            args.push(arg);
        }

        Ok(PlatformCommand::new(self.java_executable(), args))
    }
}
