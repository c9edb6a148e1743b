//! The filter evaluator. Strict, coercion-free comparisons: a rule whose
//! operands do not satisfy its type preconditions is false, never an error.

use regex::RegexBuilder;
use serde_json::Value;

use crate::domain::ItemSnapshot;

use super::{FilterCondition, FilterRule, ItemFilter, Match, Method, Property};

/// A borrowed view of one snapshot field, shaped for comparison.
enum FieldRef<'a> {
	/// The distinguished "absent" value (`star` on unrated items).
	Missing,
	Bool(bool),
	Int(i64),
	Str(&'a str),
	List(&'a [String]),
}

pub(super) fn evaluate(item: &ItemSnapshot, filter: &ItemFilter) -> bool {
	eval_group(filter.match_mode, filter.conditions.iter(), |condition| {
		eval_condition(item, condition)
	})
}

fn eval_condition(item: &ItemSnapshot, condition: &FilterCondition) -> bool {
	eval_group(condition.match_mode, condition.rules.iter(), |rule| {
		eval_rule(item, rule)
	})
}

// Empty conjunction and empty disjunction are both defined as true: an empty
// conditions sequence means "match everything".
fn eval_group<T>(
	match_mode: Match,
	members: impl ExactSizeIterator<Item = T>,
	mut pred: impl FnMut(T) -> bool,
) -> bool {
	if members.len() == 0 {
		return true;
	}

	match match_mode {
		Match::All => {
			for member in members {
				if !pred(member) {
					return false;
				}
			}
			true
		}
		Match::Any => {
			for member in members {
				if pred(member) {
					return true;
				}
			}
			false
		}
	}
}

fn eval_rule(item: &ItemSnapshot, rule: &FilterRule) -> bool {
	let field = project(item, rule.property);
	let value = rule.value.as_ref();

	match rule.method {
		Method::Is => value.is_some_and(|v| field_equals(&field, v)),
		Method::IsNot => value.is_some_and(|v| !field_equals(&field, v)),

		Method::Contains => string_test(&field, value, |s, needle| s.contains(needle)),
		Method::NotContains => string_test(&field, value, |s, needle| !s.contains(needle)),
		Method::StartsWith => string_test(&field, value, |s, prefix| s.starts_with(prefix)),
		Method::EndsWith => string_test(&field, value, |s, suffix| s.ends_with(suffix)),

		Method::Matches => regex_test(&field, value),

		Method::Gt => numeric_test(&field, value, |v, r| v > r),
		Method::Gte => numeric_test(&field, value, |v, r| v >= r),
		Method::Lt => numeric_test(&field, value, |v, r| v < r),
		Method::Lte => numeric_test(&field, value, |v, r| v <= r),
		Method::Between => between_test(&field, value),

		Method::IsEmpty => is_empty(&field),
		Method::IsNotEmpty => !is_empty(&field),

		Method::IncludesAny => set_test(&field, value, |present| present.iter().any(|p| *p)),
		Method::IncludesAll => set_test(&field, value, |present| present.iter().all(|p| *p)),
		Method::ExcludesAny => set_test(&field, value, |present| present.iter().any(|p| !*p)),
		Method::ExcludesAll => set_test(&field, value, |present| present.iter().all(|p| !*p)),

		Method::Unknown => false,
	}
}

fn project(item: &ItemSnapshot, property: Property) -> FieldRef<'_> {
	match property {
		Property::Id => FieldRef::Str(&item.id),
		Property::Name => FieldRef::Str(&item.name),
		Property::Ext => FieldRef::Str(&item.ext),
		Property::Url => FieldRef::Str(&item.url),
		Property::Annotation => FieldRef::Str(&item.annotation),
		Property::Tags => FieldRef::List(&item.tags),
		Property::Folders => FieldRef::List(&item.folders),
		Property::Star => match item.star {
			Some(star) => FieldRef::Int(i64::from(star)),
			None => FieldRef::Missing,
		},
		Property::Width => FieldRef::Int(item.width),
		Property::Height => FieldRef::Int(item.height),
		Property::Size => FieldRef::Int(item.size),
		Property::ImportedAt => FieldRef::Int(item.imported_at),
		Property::ModifiedAt => FieldRef::Int(item.modified_at),
		Property::IsDeleted => FieldRef::Bool(item.is_deleted),
	}
}

// Strict equality by primitive value. Absent fields equal nothing, and
// sequences never compare equal through `is`.
fn field_equals(field: &FieldRef<'_>, value: &Value) -> bool {
	match (field, value) {
		(FieldRef::Str(s), Value::String(r)) => *s == r,
		(FieldRef::Int(i), Value::Number(n)) => n.as_f64() == Some(*i as f64),
		(FieldRef::Bool(b), Value::Bool(r)) => b == r,
		_ => false,
	}
}

fn string_test(
	field: &FieldRef<'_>,
	value: Option<&Value>,
	test: impl FnOnce(&str, &str) -> bool,
) -> bool {
	let (FieldRef::Str(s), Some(value)) = (field, value) else {
		return false;
	};

	match stringify(value) {
		Some(needle) => test(s, &needle),
		None => false,
	}
}

// Matching is always case-insensitive; an uncompilable pattern behaves like
// any other unmet precondition.
fn regex_test(field: &FieldRef<'_>, value: Option<&Value>) -> bool {
	let (FieldRef::Str(s), Some(value)) = (field, value) else {
		return false;
	};
	let Some(pattern) = stringify(value) else {
		return false;
	};

	RegexBuilder::new(&pattern)
		.case_insensitive(true)
		.build()
		.map(|re| re.is_match(s))
		.unwrap_or(false)
}

fn numeric_test(
	field: &FieldRef<'_>,
	value: Option<&Value>,
	test: impl FnOnce(f64, f64) -> bool,
) -> bool {
	let (FieldRef::Int(v), Some(Value::Number(n))) = (field, value) else {
		return false;
	};

	match n.as_f64() {
		Some(r) => test(*v as f64, r),
		None => false,
	}
}

// Inclusive on both ends; the stored value is the ordered pair `[min, max]`.
fn between_test(field: &FieldRef<'_>, value: Option<&Value>) -> bool {
	let (FieldRef::Int(v), Some(Value::Array(range))) = (field, value) else {
		return false;
	};
	let [min, max] = range.as_slice() else {
		return false;
	};
	let (Some(min), Some(max)) = (min.as_f64(), max.as_f64()) else {
		return false;
	};

	let v = *v as f64;
	min <= v && v <= max
}

fn is_empty(field: &FieldRef<'_>) -> bool {
	match field {
		FieldRef::Missing => true,
		FieldRef::Str(s) => s.is_empty(),
		FieldRef::List(l) => l.is_empty(),
		FieldRef::Bool(_) | FieldRef::Int(_) => false,
	}
}

// Set comparison over string sequences. Each rule-value element is "present"
// iff it is a string found in the snapshot sequence; non-string elements are
// present nowhere.
fn set_test(
	field: &FieldRef<'_>,
	value: Option<&Value>,
	verdict: impl FnOnce(&[bool]) -> bool,
) -> bool {
	let (FieldRef::List(members), Some(Value::Array(elements))) = (field, value) else {
		return false;
	};

	let present = elements
		.iter()
		.map(|element| match element {
			Value::String(s) => members.iter().any(|m| m == s),
			_ => false,
		})
		.collect::<Vec<_>>();

	verdict(&present)
}

// Primitive values stringify the way they print; anything else falls back to
// compact JSON text.
fn stringify(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		other => serde_json::to_string(other).ok(),
	}
}
