//! Visibility-scoped resolution.
//!
//! A declaration can restrict which referencing identities may see it.
//! Restrictions are recorded as [`VisibilityRule`]s — a glob pattern over
//! the requesting identity plus a target category — derived from the
//! source-level visibility tier (`private` / `internal` / `public`).
//!
//! Positions with no recorded rules fall back to a caller-supplied default
//! policy. The fallback may need the defining document's own declared
//! identity, which is looked up through [`IdentityProvider`]; when that
//! lookup fails (the document never parsed successfully), resolution
//! defaults to visible — hiding a valid symbol from an interactive feature
//! is worse than showing one that should have been hidden.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::base::{DEFAULT_NAMESPACE, ResourceLocation};
use crate::cache::types::CacheType;

/// Source-level declared visibility tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityTier {
    Private,
    Internal,
    Public,
}

impl VisibilityTier {
    /// Derive the recorded rules for a declaration of this tier.
    ///
    /// - `private`: visible only to exact self-references within the
    ///   defining category.
    /// - `internal`: visible to the defining namespace in any category;
    ///   additionally, consumers in the default namespace can always see
    ///   internal symbols from any namespace.
    /// - `public`: visible to everyone.
    pub fn rules_for(
        &self,
        defining_type: CacheType,
        defining_id: &ResourceLocation,
    ) -> Vec<VisibilityRule> {
        match self {
            Self::Private => vec![VisibilityRule::new(
                defining_id.to_full_string(),
                RuleTarget::Category(defining_type),
            )],
            Self::Internal => {
                let mut rules = vec![VisibilityRule::new(
                    format!("{}:**", defining_id.namespace()),
                    RuleTarget::Any,
                )];
                if !defining_id.is_default_namespace() {
                    rules.push(VisibilityRule::new(
                        format!("{DEFAULT_NAMESPACE}:**"),
                        RuleTarget::Any,
                    ));
                }
                rules
            }
            Self::Public => vec![VisibilityRule::new("**", RuleTarget::Any)],
        }
    }
}

/// The category a rule applies to: one specific type, or any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleTarget {
    /// Wildcard: the rule applies regardless of the requesting category.
    Any,
    Category(CacheType),
}

// The persisted form writes the wildcard as "*" next to canonical type
// names, so (de)serialization is by hand.
impl Serialize for RuleTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Category(ty) => serializer.serialize_str(ty.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for RuleTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TargetVisitor;

        impl Visitor<'_> for TargetVisitor {
            type Value = RuleTarget;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"*\" or a cache type name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RuleTarget, E> {
                if value == "*" {
                    return Ok(RuleTarget::Any);
                }
                CacheType::from_str(value)
                    .map(RuleTarget::Category)
                    .map_err(|_| E::custom(format!("unknown cache type `{value}`")))
            }
        }

        deserializer.deserialize_str(TargetVisitor)
    }
}

/// A single visibility rule: a glob pattern over requesting identities and
/// the category it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub pattern: String,
    #[serde(rename = "type")]
    pub target: RuleTarget,
}

impl VisibilityRule {
    pub fn new(pattern: impl Into<String>, target: RuleTarget) -> Self {
        Self {
            pattern: pattern.into(),
            target,
        }
    }

    /// Test one rule against a requesting category and identity.
    ///
    /// Fails fast when the target category is specific and differs from the
    /// requesting category; otherwise the pattern is matched, fully
    /// anchored, against the requesting identity's full string form.
    pub fn permits(&self, requesting_type: CacheType, requesting_id: &str) -> bool {
        if let RuleTarget::Category(target) = self.target {
            if target != requesting_type {
                return false;
            }
        }
        glob_match(&self.pattern, requesting_id)
    }
}

/// The fallback policy applied to positions with no recorded rules,
/// supplied by configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisibilityDefault {
    /// A bare tier: rules are derived on the fly from the defining
    /// document's own declared identity.
    Tier(VisibilityTier),
    /// An explicit rule set.
    Rules(Vec<VisibilityRule>),
}

/// On-demand lookup of a document's declared identity and category.
///
/// Supplied by the document registry; used only on the fallback path of
/// visibility testing.
pub trait IdentityProvider {
    fn declared_identity(&self, doc: &str) -> Option<(CacheType, ResourceLocation)>;
}

/// An [`IdentityProvider`] that resolves nothing. Useful for callers that
/// have no document registry; tier fallbacks then resolve to visible.
pub struct NoIdentities;

impl IdentityProvider for NoIdentities {
    fn declared_identity(&self, _doc: &str) -> Option<(CacheType, ResourceLocation)> {
        None
    }
}

/// Test whether a requesting identity may see a position.
///
/// `rules` are the position's recorded rules; an empty slice means none
/// were recorded and the default policy applies. A non-empty rule set
/// passes if any member rule passes.
pub fn is_visible_to(
    rules: &[VisibilityRule],
    requesting_type: CacheType,
    requesting_id: &str,
    defining_doc: Option<&str>,
    default: &VisibilityDefault,
    identities: &dyn IdentityProvider,
) -> bool {
    if rules.is_empty() {
        let derived;
        let fallback = match default {
            VisibilityDefault::Rules(rules) => rules.as_slice(),
            VisibilityDefault::Tier(tier) => {
                let resolved = defining_doc
                    .and_then(|doc| identities.declared_identity(doc));
                match resolved {
                    Some((def_type, def_id)) => {
                        derived = tier.rules_for(def_type, &def_id);
                        derived.as_slice()
                    }
                    None => {
                        // The defining document never resolved to an
                        // identity; treat the symbol as visible rather than
                        // hide it from interactive features.
                        tracing::debug!(
                            doc = defining_doc.unwrap_or("<unstamped>"),
                            "cannot resolve defining identity for visibility fallback, \
                             defaulting to visible"
                        );
                        return true;
                    }
                }
            }
        };
        return fallback
            .iter()
            .any(|rule| rule.permits(requesting_type, requesting_id));
    }
    rules
        .iter()
        .any(|rule| rule.permits(requesting_type, requesting_id))
}

// ============================================================================
// GLOB MATCHING
// ============================================================================

/// One compiled token of the 4-symbol glob DSL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GlobToken {
    /// `?`: exactly one character that is not `:` or `/`.
    AnyChar,
    /// `*`: zero or more characters that are not `:` or `/`.
    Segment,
    /// `**` or `**/`: zero or more characters of any kind.
    Deep,
    /// A literal character, matched exactly.
    Literal(char),
}

fn is_separator(c: char) -> bool {
    c == ':' || c == '/'
}

/// Tokenize a pattern. The most specific token is recognized first so a
/// shorter wildcard never swallows a longer one: `**/` before `**` before
/// `*`.
fn compile(pattern: &str) -> Vec<GlobToken> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                // `**/` consumes the slash as part of the token.
                tokens.push(GlobToken::Deep);
                i += if chars.get(i + 2) == Some(&'/') { 3 } else { 2 };
            }
            '*' => {
                tokens.push(GlobToken::Segment);
                i += 1;
            }
            '?' => {
                tokens.push(GlobToken::AnyChar);
                i += 1;
            }
            c => {
                tokens.push(GlobToken::Literal(c));
                i += 1;
            }
        }
    }
    tokens
}

/// Match a pattern against an input, anchored at both ends.
///
/// Hand-rolled over the 4-token grammar instead of substituting into a
/// regex engine; literal characters always match exactly (see DESIGN.md on
/// the pattern-escaping history).
pub fn glob_match(pattern: &str, input: &str) -> bool {
    let tokens = compile(pattern);
    let chars: Vec<char> = input.chars().collect();
    match_tokens(&tokens, &chars)
}

fn match_tokens(tokens: &[GlobToken], input: &[char]) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return input.is_empty();
    };
    match first {
        GlobToken::Literal(c) => input.first() == Some(c) && match_tokens(rest, &input[1..]),
        GlobToken::AnyChar => {
            matches!(input.first(), Some(c) if !is_separator(*c)) && match_tokens(rest, &input[1..])
        }
        GlobToken::Deep => (0..=input.len()).any(|n| match_tokens(rest, &input[n..])),
        GlobToken::Segment => {
            let run = input.iter().take_while(|c| !is_separator(**c)).count();
            (0..=run).any(|n| match_tokens(rest, &input[n..]))
        }
    }
}
