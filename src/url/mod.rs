//! URL handling: normalization, domain guarding, and link filtering
//!
//! Everything here is pure. The crawler treats two URLs as the same page
//! exactly when their normalized forms are equal.

mod domain;
mod filter;
mod normalize;

pub use domain::{extract_domain, in_domain};
pub use filter::should_visit;
pub use normalize::{normalize_url, resolve_url};
