use super::{CommandEnv, CommandOutput, Effect};
use crate::navigator::Navigator;

pub(super) fn pwd(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::lines(Navigator::new(env.content).pwd(env.path))
}

pub(super) fn ls(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::lines(Navigator::new(env.content).ls(env.path))
}

pub(super) fn cd(env: &CommandEnv<'_>, args: &[String]) -> CommandOutput {
    let outcome = Navigator::new(env.content).cd(env.path, args.first().map(String::as_str));
    match outcome.target {
        Some(target) => {
            CommandOutput::with_effect(outcome.lines, Effect::ChangeDirectory(target))
        }
        None => CommandOutput::lines(outcome.lines),
    }
}

pub(super) fn projects(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    CommandOutput::lines(Navigator::new(env.content).projects(env.path))
}
