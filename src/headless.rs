use std::path::Path;

use serde::Serialize;

use crate::app::PromptIdentity;
use crate::artifact_io::read_text_file;
use crate::error::AppResult;
use crate::interpreter::Interpreter;
use crate::session::{Line, LineKind};

#[derive(Debug, Serialize)]
pub struct HeadlessReport<'a> {
    pub theme: &'static str,
    pub path: String,
    pub lines: &'a [Line],
}

impl<'a> HeadlessReport<'a> {
    pub fn from_interpreter(interpreter: &'a Interpreter) -> Self {
        Self {
            theme: interpreter.theme().as_str(),
            path: interpreter.path().to_string(),
            lines: interpreter.scrollback(),
        }
    }
}

/// Script lines to submit: blank lines and `#` comments are skipped.
pub fn script_commands(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_script(path: &Path) -> AppResult<Vec<String>> {
    Ok(script_commands(&read_text_file(path)?))
}

pub fn run_commands<I, S>(interpreter: &mut Interpreter, commands: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for command in commands {
        tracing::debug!(command = command.as_ref(), "headless submit");
        interpreter.submit(command.as_ref());
    }
}

/// Scrollback as plain text, command lines rendered behind the prompt they
/// were typed at.
pub fn render_plain(lines: &[Line], identity: &PromptIdentity) -> String {
    let mut out = String::new();
    for line in lines {
        if line.kind == LineKind::Command {
            let label = line.path.as_deref().unwrap_or("~");
            out.push_str(&format!(
                "{}@{}:{label}$ {}",
                identity.user, identity.host, line.text
            ));
        } else {
            out.push_str(&line.text);
        }
        out.push('\n');
    }
    out
}

pub fn render_json(report: &HeadlessReport<'_>) -> AppResult<String> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    Ok(text)
}
