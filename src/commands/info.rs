use super::{CommandEnv, CommandOutput};
use crate::text_layout::wrap_words;

const BOX_INNER_WIDTH: usize = 59;
const PARAGRAPH_WIDTH: u16 = 56;
const SKILL_BAR_CELLS: usize = 10;

pub(super) fn about(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let personal = &env.content.personal;
    let border = "═".repeat(BOX_INNER_WIDTH);
    let boxed = |text: &str| {
        let clipped: String = text.chars().take(BOX_INNER_WIDTH).collect();
        format!("  ║{clipped:<width$}║", width = BOX_INNER_WIDTH)
    };

    let mut lines = vec![
        String::new(),
        format!("  ╔{border}╗"),
        boxed(""),
        boxed(&format!("   Hi! I'm {}", personal.name)),
        boxed(""),
        boxed(&format!("   {}", personal.role)),
        boxed(""),
        format!("  ╚{border}╝"),
        String::new(),
    ];

    if !personal.description.is_empty() {
        lines.extend(
            wrap_words(&personal.description, PARAGRAPH_WIDTH)
                .into_iter()
                .map(|row| format!("  {row}")),
        );
        lines.push(String::new());
    }
    if !personal.focus.is_empty() {
        lines.push("  Currently focused on:".to_string());
        lines.extend(personal.focus.iter().map(|item| format!("     • {item}")));
        lines.push(String::new());
    }
    if !personal.location.is_empty() {
        lines.push(format!("  Based in: {}", personal.location));
        lines.push(String::new());
    }
    lines.push("  Type 'skills' to see my technical skills".to_string());
    lines.push("  Type 'projects' to view my work".to_string());
    lines.push("  Type 'contact' to get in touch".to_string());
    CommandOutput::lines(lines)
}

pub(super) fn skills(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let categories = &env.content.skills;
    let width = categories
        .iter()
        .flat_map(|category| category.skills.iter())
        .map(|skill| skill.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Technical Skills:".to_string()];
    for category in categories {
        lines.push(String::new());
        lines.push(format!("{}:", category.name));
        for skill in &category.skills {
            let level = skill.level.min(100);
            lines.push(format!(
                "  {:<width$}  {} {level}%",
                skill.name,
                skill_bar(level)
            ));
        }
    }
    CommandOutput::lines(lines)
}

fn skill_bar(level: u8) -> String {
    let filled = (usize::from(level) * SKILL_BAR_CELLS + 50) / 100;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SKILL_BAR_CELLS - filled)
    )
}

pub(super) fn experience(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let mut lines = vec!["Work Experience:".to_string()];
    for entry in &env.content.experience {
        lines.push(String::new());
        lines.push(format!("{} @ {}", entry.role, entry.company));
        match (entry.period.is_empty(), entry.location.is_empty()) {
            (false, false) => lines.push(format!("  {} | {}", entry.period, entry.location)),
            (false, true) => lines.push(format!("  {}", entry.period)),
            (true, false) => lines.push(format!("  {}", entry.location)),
            (true, true) => {}
        }
        lines.extend(
            entry
                .achievements
                .iter()
                .map(|achievement| format!("  • {achievement}")),
        );
    }
    CommandOutput::lines(lines)
}

pub(super) fn contact(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let personal = &env.content.personal;
    let mut fields: Vec<(&str, &str)> = Vec::new();
    if !personal.email.is_empty() {
        fields.push(("Email", personal.email.as_str()));
    }
    if let Some(phone) = personal.phone.as_deref() {
        fields.push(("Phone", phone));
    }
    if !personal.location.is_empty() {
        fields.push(("Location", personal.location.as_str()));
    }
    for link in &personal.links {
        fields.push((link.label.as_str(), link.url.as_str()));
    }

    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    let mut lines = vec!["Contact Information:".to_string(), String::new()];
    lines.extend(
        fields
            .into_iter()
            .map(|(label, value)| format!("  {:<width$} {value}", format!("{label}:"))),
    );
    lines.push(String::new());
    lines.push("  Feel free to reach out for collaborations or opportunities!".to_string());
    CommandOutput::lines(lines)
}

pub(super) fn resume(env: &CommandEnv<'_>, _args: &[String]) -> CommandOutput {
    let personal = &env.content.personal;
    let mut lines = vec![
        "Resume".to_string(),
        String::new(),
        format!("  {} - {}", personal.name, personal.role),
    ];
    if !personal.quick_stats.is_empty() {
        lines.push(String::new());
        lines.extend(
            personal
                .quick_stats
                .iter()
                .map(|stat| format!("  {}: {}", stat.label, stat.value)),
        );
    }
    lines.push(String::new());
    match personal.resume_url.as_deref() {
        Some(url) => lines.push(format!("  Download: {url}")),
        None => lines.push("  Resume download is not available yet.".to_string()),
    }
    lines.push("  Type 'experience' for work history".to_string());
    CommandOutput::lines(lines)
}
