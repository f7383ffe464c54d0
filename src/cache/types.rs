//! The closed registry of cached symbol categories.
//!
//! Every identifier tracked by the cache belongs to exactly one
//! [`CacheType`]. A type is either a *file type* — one per declarable
//! resource kind, including the tag and worldgen-registry subtypes — or a
//! *miscellaneous type* for symbols that are not backed by a resource file
//! (scoreboards, bossbars, selector aliases, ...).
//!
//! The classification predicates here drive both category-name derivation
//! (file categories are pluralized) and which types completion is allowed
//! to surface (alias and color entries are internal bookkeeping).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version of the persisted cache format.
///
/// A persisted cache whose version differs from this constant must be
/// discarded wholesale by the persistence layer; there is no migration.
pub const CACHE_FILE_VERSION: u32 = 13;

/// One category of cached identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheType {
    // File types: one per resource kind.
    #[serde(rename = "advancement")]
    Advancement,
    #[serde(rename = "dimension")]
    Dimension,
    #[serde(rename = "dimension_type")]
    DimensionType,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "loot_table")]
    LootTable,
    #[serde(rename = "predicate")]
    Predicate,
    #[serde(rename = "recipe")]
    Recipe,
    // Tag file types.
    #[serde(rename = "tag/block")]
    TagBlock,
    #[serde(rename = "tag/entity_type")]
    TagEntityType,
    #[serde(rename = "tag/fluid")]
    TagFluid,
    #[serde(rename = "tag/function")]
    TagFunction,
    #[serde(rename = "tag/item")]
    TagItem,
    // Worldgen registry file types.
    #[serde(rename = "worldgen/biome")]
    WorldgenBiome,
    #[serde(rename = "worldgen/configured_carver")]
    WorldgenConfiguredCarver,
    #[serde(rename = "worldgen/configured_decorator")]
    WorldgenConfiguredDecorator,
    #[serde(rename = "worldgen/configured_feature")]
    WorldgenConfiguredFeature,
    #[serde(rename = "worldgen/configured_structure_feature")]
    WorldgenConfiguredStructureFeature,
    #[serde(rename = "worldgen/configured_surface_builder")]
    WorldgenConfiguredSurfaceBuilder,
    #[serde(rename = "worldgen/noise_settings")]
    WorldgenNoiseSettings,
    #[serde(rename = "worldgen/processor_list")]
    WorldgenProcessorList,
    #[serde(rename = "worldgen/template_pool")]
    WorldgenTemplatePool,
    // Miscellaneous (non-file) types.
    #[serde(rename = "bossbar")]
    Bossbar,
    #[serde(rename = "entity")]
    Entity,
    #[serde(rename = "objective")]
    Objective,
    #[serde(rename = "score_holder")]
    ScoreHolder,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "tag")]
    Tag,
    #[serde(rename = "team")]
    Team,
    #[serde(rename = "color")]
    Color,
    // Alias types: internal indirections recorded by the binder.
    #[serde(rename = "alias/entity")]
    AliasEntity,
    #[serde(rename = "alias/uuid")]
    AliasUuid,
    #[serde(rename = "alias/vector")]
    AliasVector,
}

impl CacheType {
    /// The closed set, in canonical order.
    pub const ALL: [CacheType; 32] = [
        Self::Advancement,
        Self::Dimension,
        Self::DimensionType,
        Self::Function,
        Self::LootTable,
        Self::Predicate,
        Self::Recipe,
        Self::TagBlock,
        Self::TagEntityType,
        Self::TagFluid,
        Self::TagFunction,
        Self::TagItem,
        Self::WorldgenBiome,
        Self::WorldgenConfiguredCarver,
        Self::WorldgenConfiguredDecorator,
        Self::WorldgenConfiguredFeature,
        Self::WorldgenConfiguredStructureFeature,
        Self::WorldgenConfiguredSurfaceBuilder,
        Self::WorldgenNoiseSettings,
        Self::WorldgenProcessorList,
        Self::WorldgenTemplatePool,
        Self::Bossbar,
        Self::Entity,
        Self::Objective,
        Self::ScoreHolder,
        Self::Storage,
        Self::Tag,
        Self::Team,
        Self::Color,
        Self::AliasEntity,
        Self::AliasUuid,
        Self::AliasVector,
    ];

    /// Canonical name, matching the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advancement => "advancement",
            Self::Dimension => "dimension",
            Self::DimensionType => "dimension_type",
            Self::Function => "function",
            Self::LootTable => "loot_table",
            Self::Predicate => "predicate",
            Self::Recipe => "recipe",
            Self::TagBlock => "tag/block",
            Self::TagEntityType => "tag/entity_type",
            Self::TagFluid => "tag/fluid",
            Self::TagFunction => "tag/function",
            Self::TagItem => "tag/item",
            Self::WorldgenBiome => "worldgen/biome",
            Self::WorldgenConfiguredCarver => "worldgen/configured_carver",
            Self::WorldgenConfiguredDecorator => "worldgen/configured_decorator",
            Self::WorldgenConfiguredFeature => "worldgen/configured_feature",
            Self::WorldgenConfiguredStructureFeature => "worldgen/configured_structure_feature",
            Self::WorldgenConfiguredSurfaceBuilder => "worldgen/configured_surface_builder",
            Self::WorldgenNoiseSettings => "worldgen/noise_settings",
            Self::WorldgenProcessorList => "worldgen/processor_list",
            Self::WorldgenTemplatePool => "worldgen/template_pool",
            Self::Bossbar => "bossbar",
            Self::Entity => "entity",
            Self::Objective => "objective",
            Self::ScoreHolder => "score_holder",
            Self::Storage => "storage",
            Self::Tag => "tag",
            Self::Team => "team",
            Self::Color => "color",
            Self::AliasEntity => "alias/entity",
            Self::AliasUuid => "alias/uuid",
            Self::AliasVector => "alias/vector",
        }
    }

    /// True for types backed by a resource file (including tag and worldgen
    /// subtypes).
    pub fn is_file_type(&self) -> bool {
        matches!(
            self,
            Self::Advancement
                | Self::Dimension
                | Self::DimensionType
                | Self::Function
                | Self::LootTable
                | Self::Predicate
                | Self::Recipe
        ) || self.is_tag_file_type()
            || self.is_worldgen_registry_file_type()
    }

    pub fn is_tag_file_type(&self) -> bool {
        matches!(
            self,
            Self::TagBlock | Self::TagEntityType | Self::TagFluid | Self::TagFunction | Self::TagItem
        )
    }

    pub fn is_worldgen_registry_file_type(&self) -> bool {
        matches!(
            self,
            Self::WorldgenBiome
                | Self::WorldgenConfiguredCarver
                | Self::WorldgenConfiguredDecorator
                | Self::WorldgenConfiguredFeature
                | Self::WorldgenConfiguredStructureFeature
                | Self::WorldgenConfiguredSurfaceBuilder
                | Self::WorldgenNoiseSettings
                | Self::WorldgenProcessorList
                | Self::WorldgenTemplatePool
        )
    }

    pub fn is_misc_type(&self) -> bool {
        !self.is_file_type()
    }

    pub fn is_alias_type(&self) -> bool {
        matches!(self, Self::AliasEntity | Self::AliasUuid | Self::AliasVector)
    }

    /// Internal types are bookkeeping entries (aliases, color references)
    /// and are never surfaced to users, e.g. by completion.
    pub fn is_internal_type(&self) -> bool {
        self.is_alias_type() || matches!(self, Self::Color)
    }

    /// True for types whose identifiers are namespaced resource locations.
    pub fn is_namespaced_type(&self) -> bool {
        self.is_file_type() || matches!(self, Self::Bossbar | Self::Storage)
    }

    /// Pluralized category name for file types, e.g. `function` →
    /// `"functions"`. `dimension` and `dimension_type` already read as
    /// category names and stay unchanged. `None` for misc types.
    pub fn plural_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Advancement => "advancements",
            Self::Dimension => "dimension",
            Self::DimensionType => "dimension_type",
            Self::Function => "functions",
            Self::LootTable => "loot_tables",
            Self::Predicate => "predicates",
            Self::Recipe => "recipes",
            Self::TagBlock => "tag/blocks",
            Self::TagEntityType => "tag/entity_types",
            Self::TagFluid => "tag/fluids",
            Self::TagFunction => "tag/functions",
            Self::TagItem => "tag/items",
            Self::WorldgenBiome => "worldgen/biomes",
            Self::WorldgenConfiguredCarver => "worldgen/configured_carvers",
            Self::WorldgenConfiguredDecorator => "worldgen/configured_decorators",
            Self::WorldgenConfiguredFeature => "worldgen/configured_features",
            Self::WorldgenConfiguredStructureFeature => "worldgen/configured_structure_features",
            Self::WorldgenConfiguredSurfaceBuilder => "worldgen/configured_surface_builders",
            // Mechanical pluralization, so stripping the trailing `s`
            // round-trips.
            Self::WorldgenNoiseSettings => "worldgen/noise_settingss",
            Self::WorldgenProcessorList => "worldgen/processor_lists",
            Self::WorldgenTemplatePool => "worldgen/template_pools",
            _ => return None,
        };
        Some(name)
    }
}

/// Derive a file type from a pluralized category name.
///
/// Strips a trailing pluralizing `s`, except for the two names that are
/// already singular-looking (`dimension`, `dimension_type`). Returns `None`
/// for names that do not resolve to a file type.
pub fn file_type_from_category_name(name: &str) -> Option<CacheType> {
    let singular = match name {
        "dimension" | "dimension_type" => name,
        _ => name.strip_suffix('s')?,
    };
    let ty = CacheType::from_str(singular).ok()?;
    ty.is_file_type().then_some(ty)
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_classification_is_a_partition() {
        for ty in CacheType::ALL {
            assert_ne!(ty.is_file_type(), ty.is_misc_type(), "{ty}");
        }
    }

    #[rstest]
    #[case(CacheType::Function, true, false, false)]
    #[case(CacheType::TagFunction, true, true, false)]
    #[case(CacheType::WorldgenBiome, true, false, true)]
    #[case(CacheType::Bossbar, false, false, false)]
    #[case(CacheType::AliasEntity, false, false, false)]
    fn test_file_type_predicates(
        #[case] ty: CacheType,
        #[case] file: bool,
        #[case] tag: bool,
        #[case] worldgen: bool,
    ) {
        assert_eq!(ty.is_file_type(), file);
        assert_eq!(ty.is_tag_file_type(), tag);
        assert_eq!(ty.is_worldgen_registry_file_type(), worldgen);
    }

    #[test]
    fn test_internal_types() {
        assert!(CacheType::Color.is_internal_type());
        assert!(CacheType::AliasEntity.is_internal_type());
        assert!(CacheType::AliasUuid.is_internal_type());
        assert!(CacheType::AliasVector.is_internal_type());
        assert!(!CacheType::Function.is_internal_type());
        assert!(!CacheType::Objective.is_internal_type());
    }

    #[test]
    fn test_namespaced_types() {
        assert!(CacheType::Function.is_namespaced_type());
        assert!(CacheType::Bossbar.is_namespaced_type());
        assert!(CacheType::Storage.is_namespaced_type());
        assert!(!CacheType::Objective.is_namespaced_type());
        assert!(!CacheType::ScoreHolder.is_namespaced_type());
    }

    #[rstest]
    #[case("functions", Some(CacheType::Function))]
    #[case("advancements", Some(CacheType::Advancement))]
    #[case("dimension", Some(CacheType::Dimension))]
    #[case("dimension_type", Some(CacheType::DimensionType))]
    #[case("tag/functions", Some(CacheType::TagFunction))]
    #[case("worldgen/biomes", Some(CacheType::WorldgenBiome))]
    #[case("bossbars", None)] // misc, not a file type
    #[case("nonsense", None)]
    fn test_file_type_from_category_name(#[case] name: &str, #[case] expected: Option<CacheType>) {
        assert_eq!(file_type_from_category_name(name), expected);
    }

    #[test]
    fn test_plural_round_trip() {
        for ty in CacheType::ALL {
            if let Some(plural) = ty.plural_name() {
                assert_eq!(file_type_from_category_name(plural), Some(ty), "{ty}");
            }
        }
    }

    #[test]
    fn test_canonical_name_round_trip() {
        for ty in CacheType::ALL {
            assert_eq!(ty.as_str().parse::<CacheType>(), Ok(ty));
        }
    }

    #[test]
    fn test_serde_names_match_canonical() {
        for ty in CacheType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }
}
