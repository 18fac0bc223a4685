use std::fmt;

use crate::content::{Content, ProjectCategory};

/// The interpreter's notion of the current directory. The tree is fixed at
/// two levels, so a tag is enough.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VirtualPath {
    #[default]
    Root,
    Directory(String),
}

impl VirtualPath {
    #[cfg(test)]
    pub fn directory_name(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Directory(name) => Some(name),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Prompt label shown before `$`: `~` or `~/<name>`.
    pub fn prompt_label(&self) -> String {
        match self {
            Self::Root => "~".to_string(),
            Self::Directory(name) => format!("~/{name}"),
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("home"),
            Self::Directory(name) => write!(f, "home/{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdOutcome {
    pub lines: Vec<String>,
    pub target: Option<VirtualPath>,
}

#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    content: &'a Content,
}

impl<'a> Navigator<'a> {
    pub fn new(content: &'a Content) -> Self {
        Self { content }
    }

    pub fn pwd(&self, path: &VirtualPath) -> Vec<String> {
        vec![path.to_string()]
    }

    pub fn ls(&self, path: &VirtualPath) -> Vec<String> {
        match path {
            VirtualPath::Root => {
                let mut lines = vec!["Directories:".to_string()];
                lines.extend(
                    self.content
                        .project_categories
                        .iter()
                        .map(|category| format!("  {}/", category.name)),
                );
                lines
            }
            VirtualPath::Directory(name) => match self.content.category(name) {
                Some(category) => category
                    .projects
                    .iter()
                    .enumerate()
                    .map(|(idx, project)| {
                        format!("{}. {} - {}", idx + 1, project.name, project.description)
                    })
                    .collect(),
                None => vec![format!("ls: cannot access '{path}'")],
            },
        }
    }

    pub fn cd(&self, path: &VirtualPath, arg: Option<&str>) -> CdOutcome {
        let target = arg.unwrap_or_default();
        if matches!(target, "" | ".." | "~") {
            return CdOutcome {
                lines: vec!["Moved to home".to_string()],
                target: Some(VirtualPath::Root),
            };
        }

        match self.content.category(target) {
            Some(category) => CdOutcome {
                lines: directory_listing(category),
                target: Some(VirtualPath::Directory(category.name.clone())),
            },
            None => CdOutcome {
                lines: vec![
                    format!("Directory not found: {}", target.to_lowercase()),
                    format!(
                        "Available directories: {}",
                        self.directory_candidates(path).join(", ")
                    ),
                ],
                target: None,
            },
        }
    }

    pub fn projects(&self, path: &VirtualPath) -> Vec<String> {
        if !path.is_root() {
            return self.ls(path);
        }
        let categories = &self.content.project_categories;
        let width = categories
            .iter()
            .map(|category| category.name.chars().count() + 1)
            .max()
            .unwrap_or(0);
        let mut lines = vec!["Project categories:".to_string()];
        for category in categories {
            let count = category.projects.len();
            let noun = if count == 1 { "project" } else { "projects" };
            lines.push(format!(
                "  {:<width$}  {} ({count} {noun})",
                format!("{}/", category.name),
                category.display_title(),
            ));
        }
        lines.push(String::new());
        lines.push("Use 'cd <category>' to browse projects".to_string());
        lines
    }

    /// Valid `cd` targets from `path`: every directory, plus `..` below root.
    pub fn directory_candidates(&self, path: &VirtualPath) -> Vec<String> {
        let mut candidates: Vec<String> = self
            .content
            .category_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if !path.is_root() {
            candidates.push("..".to_string());
        }
        candidates
    }
}

fn directory_listing(category: &ProjectCategory) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", category.display_title(), category.name),
        String::new(),
    ];
    for (idx, project) in category.projects.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{}. {}", idx + 1, project.name));
        lines.push(format!("   {}", project.description));
        if let Some(github) = &project.github {
            lines.push(format!("   GitHub: {github}"));
        }
        if let Some(live) = &project.live {
            lines.push(format!("   Live: {live}"));
        }
        if !project.tech.is_empty() {
            lines.push(format!("   Tech: {}", project.tech));
        }
        if !project.features.is_empty() {
            lines.push("   Features:".to_string());
            lines.extend(
                project
                    .features
                    .iter()
                    .map(|feature| format!("     • {feature}")),
            );
        }
    }
    lines
}

#[cfg(test)]
#[path = "../tests/unit/navigator_tests.rs"]
mod tests;
