//! Normalized merge identity for ledger entries.
//!
//! Non-tool entries are identified by `(kind, lowercased name)`; tools are
//! identified by their lowercased name alone, whatever kind they were filed
//! under. Every case-insensitive lookup in the workspace goes through
//! [`ResourceKey`] instead of comparing strings at the call site.

use crate::enums::ResourceKind;
use crate::structs::Resource;

/// The identity under which ledger entries merge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKey {
    /// A non-tool entry, keyed by kind and normalized name.
    Material {
        /// Resource kind.
        kind: ResourceKind,
        /// Lowercased display name.
        name: String,
    },
    /// A tool, keyed by normalized name only.
    Tool {
        /// Lowercased display name.
        name: String,
    },
}

impl ResourceKey {
    /// Key for a non-tool resource.
    pub fn material(kind: ResourceKind, name: &str) -> Self {
        Self::Material {
            kind,
            name: normalize(name),
        }
    }

    /// Key for a tool.
    pub fn tool(name: &str) -> Self {
        Self::Tool {
            name: normalize(name),
        }
    }

    /// Key for an entry given its raw fields.
    pub fn new(kind: ResourceKind, name: &str, is_tool: bool) -> Self {
        if is_tool {
            Self::tool(name)
        } else {
            Self::material(kind, name)
        }
    }

    /// Key of an existing ledger entry.
    pub fn of(resource: &Resource) -> Self {
        Self::new(resource.kind, &resource.name, resource.is_tool)
    }

    /// Whether `resource` carries this identity.
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::Material { kind, name } => {
                !resource.is_tool && resource.kind == *kind && normalize(&resource.name) == *name
            }
            Self::Tool { name } => resource.is_tool && normalize(&resource.name) == *name,
        }
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ResourceId;

    fn entry(kind: ResourceKind, name: &str, is_tool: bool) -> Resource {
        Resource {
            id: ResourceId::new(1),
            kind,
            name: name.to_owned(),
            amount: 1,
            is_tool,
        }
    }

    #[test]
    fn material_key_ignores_case() {
        let key = ResourceKey::material(ResourceKind::Ordinary, "WOOD");
        assert!(key.matches(&entry(ResourceKind::Ordinary, "wood", false)));
        assert!(key.matches(&entry(ResourceKind::Ordinary, "Wood", false)));
    }

    #[test]
    fn material_key_requires_same_kind() {
        let key = ResourceKey::material(ResourceKind::Ordinary, "Wood");
        assert!(!key.matches(&entry(ResourceKind::Rare, "Wood", false)));
    }

    #[test]
    fn material_key_never_matches_tools() {
        let key = ResourceKey::material(ResourceKind::Tool, "Axe");
        assert!(!key.matches(&entry(ResourceKind::Tool, "Axe", true)));
    }

    #[test]
    fn tool_key_ignores_kind() {
        let key = ResourceKey::tool("axe");
        assert!(key.matches(&entry(ResourceKind::Tool, "Axe", true)));
        assert!(key.matches(&entry(ResourceKind::Ordinary, "AXE", true)));
        assert!(!key.matches(&entry(ResourceKind::Tool, "Axe", false)));
    }

    #[test]
    fn of_round_trips_through_matches() {
        let wood = entry(ResourceKind::Special, "Oak Plank", false);
        assert!(ResourceKey::of(&wood).matches(&wood));
        let saw = entry(ResourceKind::Tool, "Saw", true);
        assert_eq!(ResourceKey::of(&saw), ResourceKey::tool("SAW"));
    }
}
