use crate::error::{CraftError, Result};
use crate::models::{Masteries, MasteryBonus, MasteryConfig, Recipe};

impl Recipe {
    /// Focus efficiency and quality granted by the crafter's masteries.
    ///
    /// Every item mastery of the recipe's family contributes its common
    /// bonus; the mastery of the recipe itself also adds the own bonus.
    /// Without `masteries` the bonus is zero. `Ok(None)` means the family
    /// or one of its items is missing from the masteries or the config.
    pub fn compute_masteries(
        &self,
        config: &MasteryConfig,
        masteries: Option<&Masteries>,
    ) -> Result<Option<MasteryBonus>> {
        let Some(masteries) = masteries else {
            return Ok(Some(MasteryBonus::default()));
        };

        let family = self.family.as_deref().ok_or_else(|| {
            CraftError::config(format!("Masteries of '{}' require a family", self.name))
        })?;

        let Some(levels) = masteries.get(family) else {
            log::warn!("No masteries for family '{}' ('{}')", family, self.name);
            return Ok(None);
        };
        let Some(family_config) = config.get(family) else {
            log::warn!("No mastery config for family '{}' ('{}')", family, self.name);
            return Ok(None);
        };

        let mut bonus = MasteryBonus::default();
        for (item, level) in levels {
            let Some(constants) = family_config.get(item) else {
                log::warn!("No mastery config for '{}' in family '{}'", item, family);
                return Ok(None);
            };

            let (efficiency, quality) = if *item == self.name {
                (
                    constants.own_efficiency + constants.common_efficiency,
                    constants.own_quality + constants.common_quality,
                )
            } else {
                (constants.common_efficiency, constants.common_quality)
            };
            bonus.focus_efficiency += level * efficiency;
            bonus.quality += level * quality;
        }

        Ok(Some(bonus))
    }
}
