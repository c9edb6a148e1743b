//! Declarative, serializable predicate DSL over item snapshots.
//!
//! A filter is pure data: a top-level match mode over conditions, each a
//! match mode over rules. Filters round-trip losslessly through JSON, have
//! no identity, and evaluate without touching the host.

mod builder;
mod eval;
pub mod presets;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ItemSnapshot;

pub use builder::{FilterBuilder, PatternSource, RuleBuilder};

/// How a sequence of predicates combines: conjunction or disjunction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Match {
	#[default]
	#[serde(rename = "AND")]
	All,
	#[serde(rename = "OR")]
	Any,
}

/// The closed set of snapshot properties a rule may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
	Id,
	Name,
	Ext,
	Url,
	Annotation,
	Tags,
	Folders,
	Star,
	Width,
	Height,
	Size,
	ImportedAt,
	ModifiedAt,
	IsDeleted,
}

/// The closed set of comparators. A method deserialized from a string this
/// set does not know lands on `Unknown`, which matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
	Is,
	IsNot,
	Contains,
	NotContains,
	StartsWith,
	EndsWith,
	Matches,
	Gt,
	Gte,
	Lt,
	Lte,
	Between,
	IncludesAny,
	IncludesAll,
	ExcludesAny,
	ExcludesAll,
	IsEmpty,
	IsNotEmpty,
	#[serde(other)]
	Unknown,
}

/// One `(property, method, value?)` triple. The admitted value type depends
/// on the method; mismatches evaluate to false rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
	pub property: Property,
	pub method: Method,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
}

/// An ordered rule sequence under one match mode. An empty rule sequence
/// matches every snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
	pub rules: Vec<FilterRule>,
	#[serde(rename = "match")]
	pub match_mode: Match,
}

impl FilterCondition {
	pub fn all(rules: Vec<FilterRule>) -> Self {
		Self {
			rules,
			match_mode: Match::All,
		}
	}

	pub fn any(rules: Vec<FilterRule>) -> Self {
		Self {
			rules,
			match_mode: Match::Any,
		}
	}
}

/// The top-level filter tree. An empty condition sequence matches every
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
	pub conditions: Vec<FilterCondition>,
	#[serde(rename = "match")]
	pub match_mode: Match,
}

impl ItemFilter {
	pub fn builder() -> FilterBuilder {
		FilterBuilder::new()
	}

	/// Evaluate this filter against a snapshot. Pure, allocation-bounded,
	/// never errors: any rule whose type preconditions fail is simply false.
	pub fn matches(&self, item: &ItemSnapshot) -> bool {
		eval::evaluate(item, self)
	}
}
