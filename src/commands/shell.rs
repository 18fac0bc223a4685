use super::{CommandEnv, CommandOutput, Effect};
use crate::theme::ThemeName;

pub(super) fn help(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let specs = env.registry.commands();
    let width = specs
        .iter()
        .map(|spec| spec.usage.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        specs
            .iter()
            .map(|spec| format!("  {:<width$} - {}", spec.usage, spec.description)),
    );
    CommandOutput::lines(lines)
}

pub(super) fn themes(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let mut lines = vec!["Available themes:".to_string()];
    for name in ThemeName::ALL {
        if name == env.theme {
            lines.push(format!("  {name} (active)"));
        } else {
            lines.push(format!("  {name}"));
        }
    }
    lines.push(String::new());
    lines.push("Use 'theme <name>' to switch themes".to_string());
    CommandOutput::lines(lines)
}

pub(super) fn theme(_env: &CommandEnv<'_>, args: &[String]) -> CommandOutput {
    let Some(requested) = args.first() else {
        return CommandOutput::lines(vec!["Usage: theme <name>".to_string()]);
    };
    match ThemeName::parse(requested) {
        Some(name) => CommandOutput::with_effect(
            vec![format!("Theme switched to: {name}")],
            Effect::SwitchTheme(name),
        ),
        None => CommandOutput::lines(vec![format!(
            "Theme '{}' not found. Type 'themes' to see available themes.",
            requested.to_lowercase()
        )]),
    }
}

pub(super) fn history(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::lines(
        env.history
            .iter()
            .enumerate()
            .map(|(idx, entry)| format!("{}  {entry}", idx + 1))
            .collect(),
    )
}

pub(super) fn clear(_env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::with_effect(Vec::new(), Effect::ClearScrollback)
}
