use crate::error::{FolioError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED: &str = include_str!("../assets/site.yaml");

/// Static copy for every page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    pub header: HeaderContent,
    pub hero: HeroContent,
    pub about: AboutContent,
    pub highlights: ListSection<Highlight>,
    pub skills: ListSection<String>,
    pub experience: ListSection<Role>,
    pub certifications: ListSection<Certification>,
    pub contact: ContactContent,
    pub footer: FooterContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderContent {
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    pub greeting: String,
    pub tagline: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutContent {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub links: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSection<T> {
    pub title: String,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub period: String,
    pub role: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub year: String,
    pub issuer: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactContent {
    pub title: String,
    pub intro: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
    #[serde(default)]
    pub links: IndexMap<String, String>,
    pub copyright: String,
}

impl FooterContent {
    pub fn copyright_for(&self, year: i32) -> String {
        self.copyright.replace("{year}", &year.to_string())
    }
}

impl SiteContent {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| FolioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let content: SiteContent = serde_yaml::from_str(raw)?;
        content.check()?;
        Ok(content)
    }

    /// Loads `path` when given, the embedded document otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    fn check(&self) -> Result<()> {
        let titled = [
            ("about", self.about.title.as_str()),
            ("highlights", self.highlights.title.as_str()),
            ("skills", self.skills.title.as_str()),
            ("experience", self.experience.title.as_str()),
            ("certifications", self.certifications.title.as_str()),
            ("contact", self.contact.title.as_str()),
        ];
        for (section, title) in titled {
            if title.trim().is_empty() {
                return Err(FolioError::ContentCheck(format!(
                    "section `{section}` needs a title"
                )));
            }
        }
        if self.hero.greeting.trim().is_empty() {
            return Err(FolioError::ContentCheck("hero greeting is empty".into()));
        }
        if let Some(index) = self
            .skills
            .items
            .iter()
            .position(|skill| skill.trim().is_empty())
        {
            return Err(FolioError::ContentCheck(format!(
                "skill #{} is empty",
                index + 1
            )));
        }
        Ok(())
    }
}
