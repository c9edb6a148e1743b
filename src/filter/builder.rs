//! Fluent filter construction.
//!
//! The builder and its per-rule continuation form a two-state machine:
//! [`FilterBuilder`] is the "between rules" surface (`where_`, `and`, `or`,
//! `add_condition`, `build`), [`RuleBuilder`] the "awaiting terminator"
//! surface. Every terminator verb transitions back to the builder.

use regex::Regex;
use serde_json::{json, Value};

use super::{FilterCondition, FilterRule, ItemFilter, Match, Method, Property};

#[derive(Debug, Default)]
pub struct FilterBuilder {
	conditions: Vec<FilterCondition>,
	match_mode: Match,
	current: Option<FilterCondition>,
}

impl FilterBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new condition targeting `property`.
	pub fn where_(mut self, property: Property) -> RuleBuilder {
		self.seal_current();
		self.current = Some(FilterCondition::all(vec![]));
		RuleBuilder {
			builder: self,
			property,
		}
	}

	/// Append a rule to the current condition (ALL semantics). Behaves as
	/// [`Self::where_`] when no condition is open yet.
	pub fn and(mut self, property: Property) -> RuleBuilder {
		if self.current.is_none() {
			self.current = Some(FilterCondition::all(vec![]));
		}
		RuleBuilder {
			builder: self,
			property,
		}
	}

	/// Start a new condition and make the filter match ANY of its
	/// conditions.
	pub fn or(mut self, property: Property) -> RuleBuilder {
		self.match_mode = Match::Any;
		self.where_(property)
	}

	/// Append a pre-built condition.
	pub fn add_condition(mut self, condition: FilterCondition) -> Self {
		self.seal_current();
		self.conditions.push(condition);
		self
	}

	/// Set the top-level match mode directly.
	pub fn match_mode(mut self, match_mode: Match) -> Self {
		self.match_mode = match_mode;
		self
	}

	pub fn build(mut self) -> ItemFilter {
		self.seal_current();
		ItemFilter {
			conditions: self.conditions,
			match_mode: self.match_mode,
		}
	}

	fn seal_current(&mut self) {
		if let Some(condition) = self.current.take() {
			self.conditions.push(condition);
		}
	}

	fn push_rule(mut self, property: Property, method: Method, value: Option<Value>) -> Self {
		let condition = self
			.current
			.get_or_insert_with(|| FilterCondition::all(vec![]));
		condition.rules.push(FilterRule {
			property,
			method,
			value,
		});
		self
	}
}

/// A regex operand for [`RuleBuilder::matches`]: a compiled [`Regex`] is
/// stored by its source pattern, so filters stay serializable.
pub struct PatternSource(String);

impl From<&str> for PatternSource {
	fn from(pattern: &str) -> Self {
		Self(pattern.to_owned())
	}
}

impl From<String> for PatternSource {
	fn from(pattern: String) -> Self {
		Self(pattern)
	}
}

impl From<&Regex> for PatternSource {
	fn from(regex: &Regex) -> Self {
		Self(regex.as_str().to_owned())
	}
}

impl From<Regex> for PatternSource {
	fn from(regex: Regex) -> Self {
		Self(regex.as_str().to_owned())
	}
}

/// The "awaiting terminator" surface: exactly one comparator verb closes the
/// pending rule and hands the builder back.
#[must_use = "a rule is only recorded once a terminator verb is called"]
pub struct RuleBuilder {
	builder: FilterBuilder,
	property: Property,
}

impl RuleBuilder {
	fn finish(self, method: Method, value: Option<Value>) -> FilterBuilder {
		self.builder.push_rule(self.property, method, value)
	}

	pub fn is(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Is, Some(value.into()))
	}

	pub fn is_not(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::IsNot, Some(value.into()))
	}

	pub fn contains(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Contains, Some(value.into()))
	}

	pub fn not_contains(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::NotContains, Some(value.into()))
	}

	pub fn starts_with(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::StartsWith, Some(value.into()))
	}

	pub fn ends_with(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::EndsWith, Some(value.into()))
	}

	pub fn matches(self, pattern: impl Into<PatternSource>) -> FilterBuilder {
		self.finish(Method::Matches, Some(Value::String(pattern.into().0)))
	}

	pub fn gt(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Gt, Some(value.into()))
	}

	pub fn gte(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Gte, Some(value.into()))
	}

	pub fn lt(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Lt, Some(value.into()))
	}

	pub fn lte(self, value: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Lte, Some(value.into()))
	}

	/// Stored as the ordered pair `[min, max]`; evaluation is inclusive.
	pub fn between(self, min: impl Into<Value>, max: impl Into<Value>) -> FilterBuilder {
		self.finish(Method::Between, Some(json!([min.into(), max.into()])))
	}

	pub fn includes_any<I, S>(self, values: I) -> FilterBuilder
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.finish(Method::IncludesAny, Some(string_list(values)))
	}

	pub fn includes_all<I, S>(self, values: I) -> FilterBuilder
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.finish(Method::IncludesAll, Some(string_list(values)))
	}

	pub fn excludes_any<I, S>(self, values: I) -> FilterBuilder
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.finish(Method::ExcludesAny, Some(string_list(values)))
	}

	pub fn excludes_all<I, S>(self, values: I) -> FilterBuilder
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.finish(Method::ExcludesAll, Some(string_list(values)))
	}

	pub fn is_empty(self) -> FilterBuilder {
		self.finish(Method::IsEmpty, None)
	}

	pub fn is_not_empty(self) -> FilterBuilder {
		self.finish(Method::IsNotEmpty, None)
	}
}

fn string_list<I, S>(values: I) -> Value
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	Value::Array(
		values
			.into_iter()
			.map(|v| Value::String(v.into()))
			.collect(),
	)
}
