use crate::config::MarkerConfig;
use crate::env::ItemOracle;
use crate::state::ItemStack;

/// Reads the configured boolean marker from the stack's custom data.
///
/// `None` when marker checks are disabled or the stack has no such flag.
pub fn marker_verdict(
    config: &MarkerConfig,
    items: &dyn ItemOracle,
    stack: &ItemStack,
) -> Option<bool> {
    if !config.enabled || stack.data.is_none() {
        return None;
    }
    items.custom_flag(stack, &config.key)
}
