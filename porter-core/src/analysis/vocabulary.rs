//! Fixed vocabularies that classify a component name into a structural tier

use super::StructuralTier;

const LEAF: &[&str] = &[
    "avatar", "badge", "button", "checkbox", "chip", "divider", "heading", "icon", "image", "input",
    "label", "link", "logo", "radio", "select", "spinner", "switch", "tag", "text", "toggle",
    "tooltip",
];

const COMPOSITE: &[&str] = &[
    "breadcrumb", "card", "carousel", "dialog", "dropdown", "footer", "form", "header", "list",
    "menu", "modal", "nav", "navbar", "pagination", "panel", "search", "sidebar", "table", "tabs",
    "toolbar",
];

const ASSEMBLY: &[&str] = &[
    "app", "container", "dashboard", "layout", "page", "screen", "section", "shell", "template",
    "view", "wizard",
];

/// Classify a component name.
///
/// The vocabulary word whose match ends last in the lower-cased name wins,
/// so `SearchButton` is a leaf and `ButtonGroupPanel` a composite; ties go
/// to the longer word. Unmatched names are assemblies.
pub fn resolve_tier(component_name: &str) -> StructuralTier {
    let lowered = component_name.to_lowercase();
    let mut best: Option<(usize, usize, StructuralTier)> = None;

    let vocabularies = [
        (LEAF, StructuralTier::Leaf),
        (COMPOSITE, StructuralTier::Composite),
        (ASSEMBLY, StructuralTier::Assembly),
    ];
    for (words, tier) in vocabularies {
        for word in words {
            if let Some(start) = lowered.rfind(word) {
                let candidate = (start + word.len(), word.len(), tier);
                let better = match best {
                    None => true,
                    Some((end, len, _)) => candidate.0 > end || (candidate.0 == end && candidate.1 > len),
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
    }

    best.map_or(StructuralTier::Assembly, |(_, _, tier)| tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_wins() {
        assert_eq!(resolve_tier("SearchButton"), StructuralTier::Leaf);
        assert_eq!(resolve_tier("ButtonGroupPanel"), StructuralTier::Composite);
        assert_eq!(resolve_tier("ProductCard"), StructuralTier::Composite);
        assert_eq!(resolve_tier("CheckoutPage"), StructuralTier::Assembly);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(resolve_tier("MAINNAVBAR"), StructuralTier::Composite);
        assert_eq!(resolve_tier("RichText"), StructuralTier::Leaf);
        assert_eq!(resolve_tier("AppShell"), StructuralTier::Assembly);
    }

    #[test]
    fn test_unmatched_defaults_to_assembly() {
        assert_eq!(resolve_tier("Zzz"), StructuralTier::Assembly);
        assert_eq!(resolve_tier("UnknownComponent"), StructuralTier::Assembly);
    }
}
