//! Recovery target resolution for items lost to the void or hazards.
//!
//! Every strategy shares one validity predicate ([`is_valid_spot`]) and all
//! searches are bounded, so the per-item cost has a fixed worst case.
mod resolver;
mod search;
mod validity;

pub use resolver::{RecoveryRequest, RecoverySource, RecoveryTarget, resolve};
pub use search::{find_nearest_safe_spot, validate_or_perturb};
pub use validity::{ItemBody, is_valid_spot};
