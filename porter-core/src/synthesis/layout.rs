//! Deterministic output locations and derived identifiers

use super::ArtifactKind;
use crate::analysis::StructuralTier;
use crate::text;
use std::path::{Component, Path, PathBuf};

/// Where each artifact of one component lives, relative to the output root,
/// and the identifiers the artifacts use to refer to each other.
///
/// Everything here is a pure function of the component name and tier, so
/// repeated runs always address the same files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    name: String,
    camel: String,
    tier: StructuralTier,
}

impl ArtifactLayout {
    pub fn new(component_name: &str, tier: StructuralTier) -> Self {
        let name = text::to_pascal_case(component_name);
        let camel = text::to_camel_case(&name);
        Self { name, camel, tier }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> StructuralTier {
        self.tier
    }

    pub fn kebab_name(&self) -> String {
        text::to_kebab_case(&self.name)
    }

    pub fn props_type(&self) -> String {
        format!("{}Props", self.name)
    }

    pub fn state_type(&self) -> String {
        format!("{}State", self.name)
    }

    pub fn data_type(&self) -> String {
        format!("{}Data", self.name)
    }

    pub fn hook_name(&self) -> String {
        format!("use{}Data", self.name)
    }

    pub fn query_key(&self) -> String {
        format!("{}QueryKey", self.camel)
    }

    pub fn service_class(&self) -> String {
        format!("{}Service", self.name)
    }

    pub fn service_instance(&self) -> String {
        format!("{}Service", self.camel)
    }

    pub fn service_fetch_method(&self) -> String {
        format!("fetch{}Data", self.name)
    }

    pub fn store_hook(&self) -> String {
        format!("use{}Store", self.name)
    }

    pub fn component_dir(&self) -> PathBuf {
        PathBuf::from("components").join(self.tier.as_str()).join(&self.name)
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Component => self.component_dir().join(format!("{}.tsx", self.name)),
            ArtifactKind::Types => self.component_dir().join(format!("{}.types.ts", self.name)),
            ArtifactKind::Hook => PathBuf::from("hooks").join(format!("{}.ts", self.hook_name())),
            ArtifactKind::Service => PathBuf::from("services").join(format!("{}.ts", self.service_instance())),
            ArtifactKind::Store => PathBuf::from("stores").join(format!("{}Store.ts", self.camel)),
            ArtifactKind::Test => self.test_path_for(ArtifactKind::Component),
        }
    }

    /// Test file for an artifact: `<dir>/__tests__/<stem>.test.<ext>`.
    /// Component and hook tests render JSX and so are `.tsx`.
    pub fn test_path_for(&self, kind: ArtifactKind) -> PathBuf {
        let target = self.path_for(kind);
        let dir = target.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = module_stem(&target);
        let ext = match kind {
            ArtifactKind::Component | ArtifactKind::Hook | ArtifactKind::Test => "tsx",
            _ => "ts",
        };
        dir.join("__tests__").join(format!("{stem}.test.{ext}"))
    }

    /// Import specifier from the file at `from` to the module at `to`.
    pub fn import_path(from: &Path, to: &Path) -> String {
        let from_dir: Vec<Component> = from.parent().map(|p| p.components().collect()).unwrap_or_default();
        let to_dir: Vec<Component> = to.parent().map(|p| p.components().collect()).unwrap_or_default();
        let common = from_dir.iter().zip(&to_dir).take_while(|(a, b)| a == b).count();

        let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - common];
        parts.extend(to_dir[common..].iter().map(|c| c.as_os_str().to_string_lossy().into_owned()));
        parts.push(module_stem(to));

        let joined = parts.join("/");
        if joined.starts_with("..") { joined } else { format!("./{joined}") }
    }
}

/// File name without its final extension: `Card.types.ts` -> `Card.types`
fn module_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }

    #[test]
    fn test_artifact_paths() {
        let layout = ArtifactLayout::new("UserProfileCard", StructuralTier::Composite);

        assert_eq!(
            slash(&layout.path_for(ArtifactKind::Component)),
            "components/composite/UserProfileCard/UserProfileCard.tsx"
        );
        assert_eq!(
            slash(&layout.path_for(ArtifactKind::Types)),
            "components/composite/UserProfileCard/UserProfileCard.types.ts"
        );
        assert_eq!(slash(&layout.path_for(ArtifactKind::Hook)), "hooks/useUserProfileCardData.ts");
        assert_eq!(slash(&layout.path_for(ArtifactKind::Service)), "services/userProfileCardService.ts");
        assert_eq!(slash(&layout.path_for(ArtifactKind::Store)), "stores/userProfileCardStore.ts");
    }

    #[test]
    fn test_test_paths_are_siblings() {
        let layout = ArtifactLayout::new("Navbar", StructuralTier::Composite);

        assert_eq!(
            slash(&layout.test_path_for(ArtifactKind::Component)),
            "components/composite/Navbar/__tests__/Navbar.test.tsx"
        );
        assert_eq!(
            slash(&layout.test_path_for(ArtifactKind::Types)),
            "components/composite/Navbar/__tests__/Navbar.types.test.ts"
        );
        assert_eq!(slash(&layout.test_path_for(ArtifactKind::Hook)), "hooks/__tests__/useNavbarData.test.tsx");
        assert_eq!(slash(&layout.test_path_for(ArtifactKind::Service)), "services/__tests__/navbarService.test.ts");
    }

    #[test]
    fn test_import_paths() {
        let layout = ArtifactLayout::new("Navbar", StructuralTier::Composite);
        let component = layout.path_for(ArtifactKind::Component);

        assert_eq!(
            ArtifactLayout::import_path(&component, &layout.path_for(ArtifactKind::Hook)),
            "../../../hooks/useNavbarData"
        );
        assert_eq!(
            ArtifactLayout::import_path(&component, &layout.path_for(ArtifactKind::Types)),
            "./Navbar.types"
        );
        assert_eq!(
            ArtifactLayout::import_path(&layout.path_for(ArtifactKind::Hook), &layout.path_for(ArtifactKind::Service)),
            "../services/navbarService"
        );
        assert_eq!(
            ArtifactLayout::import_path(&layout.test_path_for(ArtifactKind::Component), &component),
            "../Navbar"
        );
    }
}
