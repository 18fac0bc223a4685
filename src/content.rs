use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::artifact_io::read_text_file;
use crate::error::{AppError, AppResult};

pub const DEFAULT_CONTENT_TOML: &str = include_str!("default_content.toml");

/// Static portfolio dataset. Commands format it verbatim and never mutate it.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    pub personal: Personal,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub project_categories: Vec<ProjectCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Personal {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default)]
    pub links: Vec<SocialLink>,
    #[serde(default)]
    pub quick_stats: Vec<QuickStat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickStat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// A directory under `home` in the virtual filesystem.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCategory {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Content {
    pub fn embedded() -> AppResult<Self> {
        Self::from_toml_str(DEFAULT_CONTENT_TOML, "embedded dataset")
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = read_text_file(path)?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn from_toml_str(text: &str, origin: &str) -> AppResult<Self> {
        let content: Content = toml::from_str(text).map_err(|source| AppError::ContentParse {
            origin: origin.to_string(),
            source,
        })?;
        content.validate()?;
        Ok(content)
    }

    /// Category names double as directory names and completion candidates,
    /// so they must be unique lowercase single tokens.
    fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for category in &self.project_categories {
            let name = category.name.as_str();
            if name.is_empty()
                || name.chars().any(char::is_whitespace)
                || name != name.to_lowercase()
                || name == ".."
                || name == "~"
            {
                return Err(AppError::InvalidContent {
                    message: format!("invalid project category name '{name}'"),
                });
            }
            if !seen.insert(name) {
                return Err(AppError::InvalidContent {
                    message: format!("duplicate project category '{name}'"),
                });
            }
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&ProjectCategory> {
        self.project_categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.project_categories
            .iter()
            .map(|category| category.name.as_str())
            .collect()
    }
}

impl ProjectCategory {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}
