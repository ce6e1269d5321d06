use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::engine::{GameConstants, GameData};
use crate::error::{CraftError, Result};
use crate::models::{MasteryConfig, Recipe, Slot};
use crate::table::{read_table, KeyedTable};

pub const RECIPES_FILE: &str = "recipes.yaml";
pub const MASTERIES_FILE: &str = "masteries.yaml";
pub const BASE_FOCUS_COST_FILE: &str = "base_focus_cost.csv";
pub const ARTIFACT_ITEM_VALUES_FILE: &str = "artifact_item_values.csv";
pub const CONSTANTS_FILE: &str = "constants.yaml";

/// One item entry of `recipes.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeSpec {
    pub resources: BTreeMap<String, u32>,
    #[serde(default)]
    pub slot: Option<Slot>,
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub royal: bool,
}

/// Machine to family to item to recipe.
pub type RecipeDocument = BTreeMap<String, BTreeMap<String, BTreeMap<String, RecipeSpec>>>;

/// Everything loaded from the configuration directory.
#[derive(Debug, Clone, Default)]
pub struct CraftConfig {
    pub data: GameData,
    pub mastery_config: MasteryConfig,
    pub recipes: Vec<Recipe>,
}

/// Load a YAML or JSON document, chosen by file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&contents)?),
        "json" => Ok(serde_json::from_str(&contents)?),
        _ => Err(CraftError::InvalidInput(format!(
            "unsupported document format: {}",
            path.display()
        ))),
    }
}

/// Turn the nested recipe document into a flat recipe list.
pub fn build_recipes(document: RecipeDocument) -> Result<Vec<Recipe>> {
    let mut seen = HashSet::new();
    let mut recipes = Vec::new();

    for (machine, families) in document {
        for (family, items) in families {
            for (name, spec) in items {
                if !seen.insert(name.clone()) {
                    return Err(CraftError::config(format!("duplicate recipe '{}'", name)));
                }

                let mut recipe = Recipe::new(name, spec.resources)?
                    .with_machine(machine.clone())
                    .with_family(family.clone());
                if let Some(slot) = spec.slot {
                    recipe = recipe.with_slot(slot);
                }
                if let Some(artifact) = spec.artifact {
                    recipe = recipe.with_artifact(artifact);
                }
                if spec.royal {
                    recipe = recipe.royal()?;
                }
                recipes.push(recipe);
            }
        }
    }

    Ok(recipes)
}

/// Parse recipes from YAML text.
pub fn parse_recipes(yaml: &str) -> Result<Vec<Recipe>> {
    let document: RecipeDocument =
        serde_yaml::from_str(yaml).map_err(|e| CraftError::config(format!("recipes: {}", e)))?;
    build_recipes(document)
}

/// Read a required config file, turning any failure into a configuration error.
fn required<T>(path: &Path, load: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    if !path.is_file() {
        return Err(CraftError::config(format!("missing {}", path.display())));
    }
    load(path).map_err(|e| match e {
        CraftError::Configuration(_) => e,
        other => CraftError::config(format!("{}: {}", path.display(), other)),
    })
}

impl CraftConfig {
    /// Load every configuration file from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let constants_path = dir.join(CONSTANTS_FILE);
        let constants = if constants_path.is_file() {
            GameConstants::load(&constants_path)?
        } else {
            GameConstants::default()
        };

        let recipes = required(&dir.join(RECIPES_FILE), |path| {
            parse_recipes(&std::fs::read_to_string(path)?)
        })?;
        let mastery_config: MasteryConfig =
            required(&dir.join(MASTERIES_FILE), |path| load_document(path))?;
        let base_focus_cost: KeyedTable =
            required(&dir.join(BASE_FOCUS_COST_FILE), |path| read_table(path))?;
        let artifact_item_values: KeyedTable =
            required(&dir.join(ARTIFACT_ITEM_VALUES_FILE), |path| read_table(path))?;

        log::info!(
            "Loaded {} recipes and {} mastery families from {}",
            recipes.len(),
            mastery_config.len(),
            dir.display()
        );

        Ok(Self {
            data: GameData::new(constants, artifact_item_values, base_focus_cost)?,
            mastery_config,
            recipes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPES: &str = r#"
warrior forge:
  plate armor:
    soldier armor:
      resources: {metal bar: 16}
      slot: body
    royal armor:
      resources: {metal bar: 16}
      slot: body
      artifact: royal sigil
      royal: true
mage tower:
  cloth helmet:
    scholar cowl:
      resources: {cloth: 8}
      slot: head
"#;

    #[test]
    fn test_parse_recipes() {
        let recipes = parse_recipes(RECIPES).unwrap();
        assert_eq!(recipes.len(), 3);

        let royal = recipes.iter().find(|r| r.name == "royal armor").unwrap();
        assert!(royal.is_royal);
        assert_eq!(royal.slot, Some(Slot::Body));
        assert_eq!(royal.artifact.as_deref(), Some("royal sigil"));
        assert_eq!(royal.machine.as_deref(), Some("warrior forge"));
        assert_eq!(royal.family.as_deref(), Some("plate armor"));

        let cowl = recipes.iter().find(|r| r.name == "scholar cowl").unwrap();
        assert!(!cowl.is_royal);
        assert_eq!(cowl.resources["cloth"], 8);
    }

    #[test]
    fn test_duplicate_recipe_rejected() {
        let yaml = r#"
a:
  f1:
    boots: {resources: {leather: 8}}
b:
  f2:
    boots: {resources: {leather: 8}}
"#;
        assert!(matches!(parse_recipes(yaml), Err(CraftError::Configuration(_))));
    }

    #[test]
    fn test_royal_without_slot_rejected() {
        let yaml = "m:\n  f:\n    crown: {resources: {bar: 8}, royal: true}\n";
        assert!(matches!(parse_recipes(yaml), Err(CraftError::Configuration(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "m:\n  f:\n    boots: {resources: {bar: 8}, colour: red}\n";
        assert!(matches!(parse_recipes(yaml), Err(CraftError::Configuration(_))));
    }

    fn write_config_dir(dir: &Path) {
        std::fs::write(dir.join(RECIPES_FILE), RECIPES).unwrap();
        std::fs::write(dir.join(MASTERIES_FILE), "plate armor:\n  soldier armor: {}\n").unwrap();
        std::fs::write(
            dir.join(ARTIFACT_ITEM_VALUES_FILE),
            ",royal sigil\nitem_value,50\n",
        )
        .unwrap();
        std::fs::write(dir.join(BASE_FOCUS_COST_FILE), ",head,body\n4.0,100,200\n").unwrap();
    }

    #[test]
    fn test_constants_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config_dir(dir.path());

        let config = CraftConfig::load(dir.path()).unwrap();
        assert_eq!(config.data.constants, GameConstants::default());

        std::fs::write(dir.path().join(CONSTANTS_FILE), "premium_bonus: 2.0\n").unwrap();
        let config = CraftConfig::load(dir.path()).unwrap();
        assert_eq!(config.data.constants.premium_bonus, 2.0);
        assert_eq!(
            config.data.constants.fame_per_journal,
            GameConstants::default().fame_per_journal
        );
        assert_eq!(config.recipes.len(), 3);
    }

    #[test]
    fn test_constants_file_with_short_array_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config_dir(dir.path());
        std::fs::write(
            dir.path().join(CONSTANTS_FILE),
            "fame_per_journal: [3600.0, 7200.0]\n",
        )
        .unwrap();

        assert!(matches!(
            CraftConfig::load(dir.path()),
            Err(CraftError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CraftConfig::load(dir.path()),
            Err(CraftError::Configuration(_))
        ));
    }
}
