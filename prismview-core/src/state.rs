//! Viewer state and the reducer that updates it
use serde::{Deserialize, Serialize};

use crate::catalog::PrismTypeDescriptor;
use crate::material::Material;
use crate::prism::PrismKind;

/// Everything the user can change while viewing.
///
/// Treated as a value: updates go through [`ViewerState::apply`], which
/// returns a new state instead of mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    /// Always one of the catalog identifiers.
    pub selected_prism: String,
    pub wireframe: bool,
    pub auto_rotate: bool,
    pub show_stats: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            selected_prism: PrismKind::Rectangular.id().to_string(),
            wireframe: false,
            auto_rotate: true,
            show_stats: true,
        }
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerAction {
    /// Select by identifier; unknown identifiers select the rectangular prism.
    Select(String),
    SelectNext,
    SelectPrevious,
    SetWireframe(bool),
    SetAutoRotate(bool),
    SetShowStats(bool),
    ToggleWireframe,
    ToggleAutoRotate,
    ToggleStats,
}

impl ViewerState {
    pub fn apply(self, action: ViewerAction) -> Self {
        match action {
            ViewerAction::Select(id) => self.with_kind(PrismKind::from_id_or_default(&id)),
            ViewerAction::SelectNext => {
                let next = self.selected_kind().next();
                self.with_kind(next)
            }
            ViewerAction::SelectPrevious => {
                let previous = self.selected_kind().previous();
                self.with_kind(previous)
            }
            ViewerAction::SetWireframe(wireframe) => Self { wireframe, ..self },
            ViewerAction::SetAutoRotate(auto_rotate) => Self { auto_rotate, ..self },
            ViewerAction::SetShowStats(show_stats) => Self { show_stats, ..self },
            ViewerAction::ToggleWireframe => Self {
                wireframe: !self.wireframe,
                ..self
            },
            ViewerAction::ToggleAutoRotate => Self {
                auto_rotate: !self.auto_rotate,
                ..self
            },
            ViewerAction::ToggleStats => Self {
                show_stats: !self.show_stats,
                ..self
            },
        }
    }

    fn with_kind(self, kind: PrismKind) -> Self {
        Self {
            selected_prism: kind.id().to_string(),
            ..self
        }
    }

    pub fn selected_kind(&self) -> PrismKind {
        PrismKind::from_id_or_default(&self.selected_prism)
    }

    pub fn descriptor(&self) -> &'static PrismTypeDescriptor {
        self.selected_kind().descriptor()
    }

    pub fn material(&self) -> Material {
        Material::for_mode(self.wireframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ViewerState::default();
        assert_eq!(state.selected_prism, "rectangular");
        assert!(!state.wireframe);
        assert!(state.auto_rotate);
        assert!(state.show_stats);
    }

    #[test]
    fn test_select_known_and_unknown() {
        let state = ViewerState::default().apply(ViewerAction::Select("hexagonal".into()));
        assert_eq!(state.selected_prism, "hexagonal");
        assert_eq!(state.descriptor().faces, 8);

        let state = state.apply(ViewerAction::Select("cylinder".into()));
        assert_eq!(state.selected_prism, "rectangular");
    }

    #[test]
    fn test_apply_leaves_other_fields_untouched() {
        let before = ViewerState::default().apply(ViewerAction::Select("octagonal".into()));
        let after = before.clone().apply(ViewerAction::ToggleWireframe);
        assert!(after.wireframe);
        assert_eq!(after.selected_prism, before.selected_prism);
        assert_eq!(after.auto_rotate, before.auto_rotate);
        assert_eq!(after.show_stats, before.show_stats);
    }

    #[test]
    fn test_toggles_and_setters() {
        let state = ViewerState::default()
            .apply(ViewerAction::ToggleAutoRotate)
            .apply(ViewerAction::ToggleStats)
            .apply(ViewerAction::SetWireframe(true));
        assert!(!state.auto_rotate);
        assert!(!state.show_stats);
        assert!(state.wireframe);

        let state = state
            .apply(ViewerAction::SetAutoRotate(true))
            .apply(ViewerAction::SetShowStats(true))
            .apply(ViewerAction::ToggleWireframe);
        assert_eq!(state, ViewerState::default());
    }

    #[test]
    fn test_cycle_selection() {
        let state = ViewerState::default().apply(ViewerAction::SelectNext);
        assert_eq!(state.selected_prism, "pentagonal");
        let state = state
            .apply(ViewerAction::SelectPrevious)
            .apply(ViewerAction::SelectPrevious);
        assert_eq!(state.selected_prism, "triangular");
    }

    #[test]
    fn test_material_follows_wireframe_flag() {
        let state = ViewerState::default();
        assert_eq!(state.material(), Material::SOLID);
        assert_eq!(
            state.apply(ViewerAction::ToggleWireframe).material(),
            Material::WIREFRAME
        );
    }
}
