//! Pre-configured panel profiles
//!
//! Profiles for Crystalfontz EVE modules. Each is a `const` that any number
//! of driver instances may borrow.

pub mod crystalfontz;

pub use crystalfontz::*;

use crate::PanelProfile;

/// Every shipped profile, in lookup order.
pub const ALL: &[&PanelProfile<'static>] = &[&CFA480128, &CFA800480];

/// Find a shipped profile by name, ignoring ASCII case.
///
/// Matches either the full profile name or its part number prefix
/// (e.g. `"cfa800480"`).
pub fn by_name(name: &str) -> Option<&'static PanelProfile<'static>> {
    ALL.iter().copied().find(|p| {
        p.name.eq_ignore_ascii_case(name)
            || p
                .name
                .get(..name.len())
                .is_some_and(|prefix| !name.is_empty() && prefix.eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_part_number() {
        assert_eq!(by_name("cfa800480").map(|p| p.hsize), Some(800));
        assert_eq!(by_name("CFA480128").map(|p| p.vsize), Some(128));
        assert!(by_name("cfa999").is_none());
        assert!(by_name("").is_none());
    }

    #[test]
    fn test_shipped_profiles_are_valid() {
        for p in ALL {
            assert!(p.hsize > 0 && p.vsize > 0, "{}", p.name);
            assert!(p.pclk > 0, "{}", p.name);
            assert!(p.hcycle > p.hoffset && p.vcycle > p.voffset, "{}", p.name);
            assert!(p.refresh_millihertz().is_some(), "{}", p.name);
        }
    }
}
