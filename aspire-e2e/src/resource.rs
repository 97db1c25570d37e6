//! Resource entry types.
//!
//! A resource is a dependent service that is consumed either as a locally
//! built project or as a prebuilt container image. This module provides the
//! record describing one resource plus the small value types around it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// How a resource is consumed.
///
/// Serialized as `"Project"` or `"Container"`. Parsing is case-insensitive,
/// both for user input and for stored files.
///
/// # Examples
///
/// ```
/// use aspire_e2e::ResourceMode;
///
/// let mode: ResourceMode = "container".parse().unwrap();
/// assert_eq!(mode, ResourceMode::Container);
/// assert_eq!(mode.toggled(), ResourceMode::Project);
/// assert_eq!(ResourceMode::default().to_string(), "Project");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceMode {
    /// Build and run the project from source.
    #[default]
    Project,
    /// Run a prebuilt container image.
    Container,
}

impl ResourceMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Project => Self::Container,
            Self::Container => Self::Project,
        }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Container => "Container",
        }
    }
}

impl fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "container" => Ok(Self::Container),
            _ => Err(Error::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// One resource's mode and locators.
///
/// Optional attributes are explicit `Option`s so that "absent" stays
/// distinguishable from "empty"; absent values are omitted when the entry is
/// written and defaulted when it is read.
///
/// # Examples
///
/// ```
/// use aspire_e2e::{ResourceEntry, ResourceMode};
///
/// let entry = ResourceEntry::new("rabbit")
///     .with_mode(ResourceMode::Container)
///     .with_container_image("rabbitmq")
///     .with_container_tag("4-management");
///
/// assert_eq!(entry.full_image().as_deref(), Some("rabbitmq:4-management"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceEntry {
    /// Stable, user-chosen identifier; the key of this entry in its document.
    pub id: String,

    /// Display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the resource is consumed as a project or a container.
    pub mode: ResourceMode,

    /// Container image name, without tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_image: Option<String>,

    /// Container image tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_tag: Option<String>,

    /// Filesystem path to the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,

    /// Whether the image should be built locally before use.
    pub build_image: bool,

    /// Command used to build the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_image_command: Option<String>,

    /// Whether the image build step is skipped for this resource.
    pub skip_image_build: bool,

    /// Registry the image is pulled from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_registry: Option<String>,
}

impl ResourceEntry {
    /// Creates an entry with the given id and every other field defaulted.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ResourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the container image name.
    #[must_use]
    pub fn with_container_image(mut self, image: impl Into<String>) -> Self {
        self.container_image = Some(image.into());
        self
    }

    /// Sets the container image tag.
    #[must_use]
    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = Some(tag.into());
        self
    }

    /// Sets the project path.
    #[must_use]
    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    /// Sets whether the image is built locally.
    #[must_use]
    pub fn with_build_image(mut self, build_image: bool) -> Self {
        self.build_image = build_image;
        self
    }

    /// Sets the image build command.
    #[must_use]
    pub fn with_build_image_command(mut self, command: impl Into<String>) -> Self {
        self.build_image_command = Some(command.into());
        self
    }

    /// Sets whether the image build step is skipped.
    #[must_use]
    pub fn with_skip_image_build(mut self, skip: bool) -> Self {
        self.skip_image_build = skip;
        self
    }

    /// Sets the image registry.
    #[must_use]
    pub fn with_image_registry(mut self, registry: impl Into<String>) -> Self {
        self.image_registry = Some(registry.into());
        self
    }

    /// Returns `image:tag`, or just `image` when there is no tag.
    ///
    /// Returns `None` when the entry has no (or an empty) container image.
    /// An empty tag counts as no tag.
    #[must_use]
    pub fn full_image(&self) -> Option<String> {
        let image = self.container_image.as_deref().filter(|s| !s.is_empty())?;
        Some(match self.container_tag.as_deref().filter(|s| !s.is_empty()) {
            Some(tag) => format!("{image}:{tag}"),
            None => image.to_string(),
        })
    }

    /// Returns the value of one field as a string, for machine-readable
    /// lookups.
    ///
    /// Absent optional fields yield `None`.
    #[must_use]
    pub fn config_value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Mode => Some(self.mode.to_string()),
            ConfigKey::Name => self.name.clone(),
            ConfigKey::ContainerImage => self.container_image.clone(),
            ConfigKey::ContainerTag => self.container_tag.clone(),
            ConfigKey::ProjectPath => self.project_path.clone(),
            ConfigKey::BuildImage => Some(self.build_image.to_string()),
            ConfigKey::BuildImageCommand => self.build_image_command.clone(),
            ConfigKey::SkipImageBuild => Some(self.skip_image_build.to_string()),
            ConfigKey::ImageRegistry => self.image_registry.clone(),
        }
    }
}

/// Names of the entry fields that can be looked up with
/// [`ResourceEntry::config_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `Mode`
    Mode,
    /// `Name`
    Name,
    /// `ContainerImage`
    ContainerImage,
    /// `ContainerTag`
    ContainerTag,
    /// `ProjectPath`
    ProjectPath,
    /// `BuildImage`
    BuildImage,
    /// `BuildImageCommand`
    BuildImageCommand,
    /// `SkipImageBuild`
    SkipImageBuild,
    /// `ImageRegistry`
    ImageRegistry,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [Self; 9] = [
        Self::Mode,
        Self::Name,
        Self::ContainerImage,
        Self::ContainerTag,
        Self::ProjectPath,
        Self::BuildImage,
        Self::BuildImageCommand,
        Self::SkipImageBuild,
        Self::ImageRegistry,
    ];

    /// Returns the key as it appears in the JSON file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "Mode",
            Self::Name => "Name",
            Self::ContainerImage => "ContainerImage",
            Self::ContainerTag => "ContainerTag",
            Self::ProjectPath => "ProjectPath",
            Self::BuildImage => "BuildImage",
            Self::BuildImageCommand => "BuildImageCommand",
            Self::SkipImageBuild => "SkipImageBuild",
            Self::ImageRegistry => "ImageRegistry",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownConfigKey { key: s.to_string() })
    }
}
