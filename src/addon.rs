//! Add-on surface: metadata, the generate operator, the side panel and the
//! registry an embedding host drives them through.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::PlacementConfig;
use crate::error::{MeatballError, Result};
use crate::placement::PlacementController;
use crate::traits::{Context, Operator, OperatorStatus};

pub const GENERATE_OPERATOR_ID: &str = "mesh.generate_random_meatball";
pub const GENERATE_OPERATOR_LABEL: &str = "Generate MeatBall";
pub const GENERATE_BUTTON_TEXT: &str = "Generate MeatBall!";
pub const PANEL_ID: &str = "OBJECT_PT_custom_panel";

/// Add-on metadata shown by the host's add-on manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub version: (u32, u32, u32),
    pub location: &'static str,
    pub description: &'static str,
}

pub const ADDON_INFO: AddonInfo = AddonInfo {
    name: "Meatball Generator",
    category: "Side Menu",
    version: (1, 0, 0),
    location: "Side Menu; Shortcut: N",
    description: "Generates random Meatball meshes",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelButton {
    pub operator_id: String,
    pub text: String,
}

/// Side panel layout: a titled column of buttons bound to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub id: String,
    pub label: String,
    pub space: String,
    pub region: String,
    pub category: String,
    pub context: String,
    pub buttons: Vec<PanelButton>,
}

impl Panel {
    /// The "MeatBall Tool :)" sidebar tab with its single button
    pub fn meatball_tool() -> Self {
        Self {
            id: PANEL_ID.to_string(),
            label: "Custom Panel".to_string(),
            space: "VIEW_3D".to_string(),
            region: "UI".to_string(),
            category: "MeatBall Tool :)".to_string(),
            context: "objectmode".to_string(),
            buttons: vec![PanelButton {
                operator_id: GENERATE_OPERATOR_ID.to_string(),
                text: GENERATE_BUTTON_TEXT.to_string(),
            }],
        }
    }
}

/// Operator wrapping a [`PlacementController`]; its tracked list lives as
/// long as the operator stays registered.
pub struct GenerateMeatball {
    controller: PlacementController,
}

impl GenerateMeatball {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            controller: PlacementController::new(config),
        }
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }
}

impl Operator for GenerateMeatball {
    fn id(&self) -> &str {
        GENERATE_OPERATOR_ID
    }

    fn label(&self) -> &str {
        GENERATE_OPERATOR_LABEL
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<OperatorStatus> {
        self.controller.trigger(&mut *ctx.scene, &mut ctx.rng)?;
        Ok(OperatorStatus::Finished)
    }
}

/// Operators and panels known to the host
#[derive(Default)]
pub struct Registry {
    operators: BTreeMap<String, Box<dyn Operator>>,
    panels: BTreeMap<String, Panel>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_operator(&mut self, operator: Box<dyn Operator>) -> Result<()> {
        let id = operator.id().to_string();
        if self.operators.contains_key(&id) {
            return Err(MeatballError::DuplicateRegistration(id));
        }
        log::debug!("Registered operator '{}'", id);
        self.operators.insert(id, operator);
        Ok(())
    }

    pub fn unregister_operator(&mut self, id: &str) -> Result<Box<dyn Operator>> {
        self.operators
            .remove(id)
            .ok_or_else(|| MeatballError::NotRegistered(id.to_string()))
    }

    pub fn register_panel(&mut self, panel: Panel) -> Result<()> {
        if self.panels.contains_key(&panel.id) {
            return Err(MeatballError::DuplicateRegistration(panel.id));
        }
        log::debug!("Registered panel '{}'", panel.id);
        self.panels.insert(panel.id.clone(), panel);
        Ok(())
    }

    pub fn unregister_panel(&mut self, id: &str) -> Result<Panel> {
        self.panels
            .remove(id)
            .ok_or_else(|| MeatballError::NotRegistered(id.to_string()))
    }

    pub fn operator(&self, id: &str) -> Option<&dyn Operator> {
        self.operators.get(id).map(|op| op.as_ref())
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn has_operator(&self, id: &str) -> bool {
        self.operators.contains_key(id)
    }

    pub fn has_panel(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    /// Run a registered operator
    pub fn invoke(&mut self, id: &str, ctx: &mut Context<'_>) -> Result<OperatorStatus> {
        let operator = self
            .operators
            .get_mut(id)
            .ok_or_else(|| MeatballError::UnknownOperator(id.to_string()))?;
        operator.execute(ctx)
    }

    /// Press the `index`-th button of a panel
    pub fn press(
        &mut self,
        panel_id: &str,
        index: usize,
        ctx: &mut Context<'_>,
    ) -> Result<OperatorStatus> {
        let panel = self
            .panels
            .get(panel_id)
            .ok_or_else(|| MeatballError::UnknownPanel(panel_id.to_string()))?;
        let operator_id = panel
            .buttons
            .get(index)
            .ok_or_else(|| MeatballError::UnknownButton {
                panel: panel_id.to_string(),
                index,
            })?
            .operator_id
            .clone();
        self.invoke(&operator_id, ctx)
    }
}

/// Registers and unregisters the add-on's operator and panel
#[derive(Debug, Default)]
pub struct MeatballAddon {
    config: PlacementConfig,
}

impl MeatballAddon {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn info(&self) -> &'static AddonInfo {
        &ADDON_INFO
    }

    pub fn init(&self, registry: &mut Registry) -> Result<()> {
        registry.register_panel(Panel::meatball_tool())?;
        if let Err(err) =
            registry.register_operator(Box::new(GenerateMeatball::new(self.config.clone())))
        {
            registry.unregister_panel(PANEL_ID)?;
            return Err(err);
        }
        log::info!(
            "{} {}.{}.{} registered",
            ADDON_INFO.name,
            ADDON_INFO.version.0,
            ADDON_INFO.version.1,
            ADDON_INFO.version.2
        );
        Ok(())
    }

    /// Unregisters both pieces; generated objects stay in the scene
    pub fn shutdown(&self, registry: &mut Registry) -> Result<()> {
        let panel = registry.unregister_panel(PANEL_ID);
        let operator = registry.unregister_operator(GENERATE_OPERATOR_ID);
        panel?;
        operator?;
        log::info!("{} unregistered", ADDON_INFO.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::InMemoryScene;
    use crate::traits::SceneGraph;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn quick_config() -> PlacementConfig {
        PlacementConfig {
            segments: 6,
            rings: 4,
            smoothing_iterations: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_init_registers_operator_and_panel() {
        let mut registry = Registry::new();
        MeatballAddon::new(quick_config()).init(&mut registry).unwrap();

        assert!(registry.has_panel(PANEL_ID));
        let operator = registry.operator(GENERATE_OPERATOR_ID).unwrap();
        assert_eq!(operator.label(), "Generate MeatBall");

        let panel = registry.panel(PANEL_ID).unwrap();
        assert_eq!(panel.category, "MeatBall Tool :)");
        assert_eq!(panel.buttons[0].text, "Generate MeatBall!");
        assert_eq!(panel.buttons[0].operator_id, GENERATE_OPERATOR_ID);
    }

    #[test]
    fn test_double_init_fails_cleanly() {
        let mut registry = Registry::new();
        let addon = MeatballAddon::new(quick_config());
        addon.init(&mut registry).unwrap();
        assert!(matches!(
            addon.init(&mut registry),
            Err(MeatballError::DuplicateRegistration(_))
        ));
        assert!(registry.has_panel(PANEL_ID));
        assert!(registry.has_operator(GENERATE_OPERATOR_ID));
    }

    #[test]
    fn test_shutdown_unregisters() {
        let mut registry = Registry::new();
        let addon = MeatballAddon::new(quick_config());
        addon.init(&mut registry).unwrap();
        addon.shutdown(&mut registry).unwrap();

        assert!(!registry.has_panel(PANEL_ID));
        assert!(!registry.has_operator(GENERATE_OPERATOR_ID));
        assert!(matches!(
            addon.shutdown(&mut registry),
            Err(MeatballError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_button_press_generates_meatball() {
        let mut registry = Registry::new();
        MeatballAddon::new(quick_config()).init(&mut registry).unwrap();
        let mut scene = InMemoryScene::new();
        let mut rng = Pcg64::seed_from_u64(12);

        for _ in 0..3 {
            let mut ctx = Context::new(&mut scene, &mut rng);
            let status = registry.press(PANEL_ID, 0, &mut ctx).unwrap();
            assert_eq!(status, OperatorStatus::Finished);
        }
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_unknown_targets() {
        let mut registry = Registry::new();
        MeatballAddon::new(quick_config()).init(&mut registry).unwrap();
        let mut scene = InMemoryScene::new();
        let mut rng = Pcg64::seed_from_u64(0);
        let mut ctx = Context::new(&mut scene, &mut rng);

        assert!(matches!(
            registry.invoke("mesh.nope", &mut ctx),
            Err(MeatballError::UnknownOperator(_))
        ));
        assert!(matches!(
            registry.press("NOPE", 0, &mut ctx),
            Err(MeatballError::UnknownPanel(_))
        ));
        assert!(matches!(
            registry.press(PANEL_ID, 1, &mut ctx),
            Err(MeatballError::UnknownButton { index: 1, .. })
        ));
    }

    #[test]
    fn test_addon_info() {
        let addon = MeatballAddon::default();
        assert_eq!(addon.info().name, "Meatball Generator");
        assert_eq!(addon.info().version, (1, 0, 0));
    }
}
