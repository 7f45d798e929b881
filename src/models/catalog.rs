use crate::error::{MarkitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageTier {
    #[default]
    Basic,
    Pro,
    Premium,
}

impl PackageTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageTier::Basic => "Basic",
            PackageTier::Pro => "Pro",
            PackageTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageTier {
    type Err = MarkitError;

    fn from_str(s: &str) -> Result<Self> {
        find_package_by_name(s).map(|package| package.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOption {
    pub id: PackageTier,
    pub name: &'static str,
    /// Display string, never parsed as money.
    pub price: &'static str,
    pub image_count: usize,
    pub description: &'static str,
}

pub static PACKAGES: &[PackageOption] = &[
    PackageOption {
        id: PackageTier::Basic,
        name: "Basic",
        price: "$10",
        image_count: 1,
        description: "1 AI-generated marketing image.",
    },
    PackageOption {
        id: PackageTier::Pro,
        name: "Pro",
        price: "$25",
        image_count: 3,
        description: "3 variations with different layouts & colors.",
    },
    PackageOption {
        id: PackageTier::Premium,
        name: "Premium",
        price: "$50",
        image_count: 5,
        description: "5+ fully customized images for social & print.",
    },
];

pub fn packages() -> &'static [PackageOption] {
    PACKAGES
}

pub fn find_package(tier: PackageTier) -> Result<&'static PackageOption> {
    PACKAGES
        .iter()
        .find(|p| p.id == tier)
        .ok_or_else(|| MarkitError::InvalidPackage(tier.to_string()))
}

pub fn find_package_by_name(name: &str) -> Result<&'static PackageOption> {
    let name = name.trim();
    PACKAGES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| MarkitError::InvalidPackage(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_counts_per_tier() {
        assert_eq!(find_package(PackageTier::Basic).unwrap().image_count, 1);
        assert_eq!(find_package(PackageTier::Pro).unwrap().image_count, 3);
        assert!(find_package(PackageTier::Premium).unwrap().image_count >= 5);
    }

    #[test]
    fn catalog_is_ordered_and_complete() {
        let ids: Vec<_> = packages().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![PackageTier::Basic, PackageTier::Pro, PackageTier::Premium]
        );
        assert!(packages().iter().all(|p| p.image_count > 0));
    }

    #[test]
    fn unknown_tier_is_an_invalid_package() {
        let err = find_package_by_name("Platinum").unwrap_err();
        assert!(matches!(err, MarkitError::InvalidPackage(_)));
        assert!(err.to_string().contains("Invalid package"));
        assert!("".parse::<PackageTier>().is_err());
    }

    #[test]
    fn tier_names_parse_case_insensitively() {
        assert_eq!("pro".parse::<PackageTier>().unwrap(), PackageTier::Pro);
        assert_eq!(" Premium ".parse::<PackageTier>().unwrap(), PackageTier::Premium);
    }
}
