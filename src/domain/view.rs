//! View identifiers and renderable page layouts.
//!
//! A view is one named screen of the experience. Each view owns a static
//! [`Surface`]: an ordered list of [`Block`]s that a render surface lays out.
//! Views are registered once at startup and never change afterwards.

use super::target::{Field, Target};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Unique, string-valued identifier of a view.
///
/// Built-in ids are `const` and borrow their text; ids read from the outside
/// world own theirs. Both compare by content.
///
/// # Examples
///
/// ```
/// use voidgate::domain::ViewId;
///
/// const ENTRY: ViewId = ViewId::from_static("entry-page");
/// assert_eq!(ENTRY, ViewId::new("entry-page".to_string()));
/// assert_eq!(ENTRY.as_str(), "entry-page");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(Cow<'static, str>);

impl ViewId {
    /// Creates an id from a string literal, usable in `const` position.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates an id from an owned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One layout element of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Large centred heading.
    Heading(&'static str),
    /// Plain body text.
    Text(&'static str),
    /// Dimmed, barely-visible text.
    Whisper(&'static str),
    /// Clickable label bound to a target.
    Link {
        label: &'static str,
        target: Target,
    },
    /// Non-link text that still reports clicks and hovers (logos, warnings).
    Hotspot {
        label: &'static str,
        target: Target,
    },
    /// Editable single-line input.
    Input(Field),
    /// Area where question cards float.
    QuestionField,
    /// Floating support widget with payment buttons.
    PaymentWidget,
    /// Vertical spacer.
    Blank,
}

/// Renderable description of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    pub blocks: Vec<Block>,
    /// Target hit by clicks that land on no block.
    pub backdrop: Option<Target>,
}

impl Surface {
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            backdrop: None,
        }
    }

    #[must_use]
    pub fn with_backdrop(mut self, target: Target) -> Self {
        self.backdrop = Some(target);
        self
    }

    /// Targets reachable from this surface: the backdrop first, then blocks in layout order.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.backdrop.into_iter().chain(self.blocks.iter().filter_map(|block| match block {
            Block::Link { target, .. } | Block::Hotspot { target, .. } => Some(*target),
            _ => None,
        }))
    }
}

/// A registered view: identifier plus its surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub id: ViewId,
    pub surface: Surface,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_and_owned_ids_compare_by_content() {
        let a = ViewId::from_static("void-page");
        let b = ViewId::new(String::from("void-page"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "void-page");
    }

    #[test]
    fn test_view_id_serializes_as_plain_string() {
        let id = ViewId::from_static("secret-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"secret-1\"");
        let back: ViewId = serde_json::from_str("\"secret-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_surface_lists_targets_in_layout_order() {
        let surface = Surface::new(vec![
            Block::Heading("hell.com"),
            Block::Link { label: "apply", target: Target::ApplyLink },
            Block::Blank,
            Block::Hotspot { label: "warning", target: Target::WarningText },
        ]);
        let targets: Vec<Target> = surface.targets().collect();
        assert_eq!(targets, vec![Target::ApplyLink, Target::WarningText]);
    }

    #[test]
    fn test_backdrop_is_listed_first() {
        let surface = Surface::new(vec![Block::Link { label: "that", target: Target::ThatLink }])
            .with_backdrop(Target::EntryPage);
        let targets: Vec<Target> = surface.targets().collect();
        assert_eq!(targets, vec![Target::EntryPage, Target::ThatLink]);
    }
}
