use crate::config::CategoryRules;
use crate::preservation::Decision;
use crate::state::ItemStack;

use super::ItemOracle;

/// Maps a stack to a type-based verdict.
///
/// Implementations combine any number of sub-rules with
/// drop > preserve > ignore precedence.
pub trait ItemClassifier: Send + Sync {
    fn classify(&self, items: &dyn ItemOracle, stack: &ItemStack, rules: &CategoryRules)
    -> Decision;
}

/// Folds the configured verdict of every category the item oracle reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryClassifier;

impl ItemClassifier for CategoryClassifier {
    fn classify(
        &self,
        items: &dyn ItemOracle,
        stack: &ItemStack,
        rules: &CategoryRules,
    ) -> Decision {
        Decision::fold(
            items
                .categories(stack)
                .categories()
                .map(|category| rules.decision_for(category)),
        )
    }
}
