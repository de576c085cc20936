// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-locale field storage.
//!
//! A [`LocalizedValues`] holds one value per locale for a single field and
//! remembers the order locales were first set in. That order is the
//! "natural" order the resolver falls back to when none of the preferred
//! locales has a value.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Values of one field keyed by locale, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedValues {
	entries: Vec<(String, String)>,
}

impl LocalizedValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Raw value stored for `locale`, including empty strings.
	pub fn get(&self, locale: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(l, _)| l == locale)
			.map(|(_, v)| v.as_str())
	}

	/// Set the value for `locale`.
	///
	/// Replacing an existing locale keeps its original position.
	pub fn set(&mut self, locale: impl Into<String>, value: impl Into<String>) {
		let locale = locale.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(l, _)| *l == locale) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((locale, value)),
		}
	}

	pub fn remove(&mut self, locale: &str) -> Option<String> {
		let index = self.entries.iter().position(|(l, _)| l == locale)?;
		Some(self.entries.remove(index).1)
	}

	/// Iterate `(locale, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
	}

	pub fn locales(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(l, _)| l.as_str())
	}

	/// First non-empty value in insertion order.
	pub fn first_non_empty(&self) -> Option<&str> {
		self.iter().map(|(_, v)| v).find(|v| !v.is_empty())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for LocalizedValues {
	fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
		let mut values = Self::new();
		for (locale, value) in iter {
			values.set(locale, value);
		}
		values
	}
}

impl Serialize for LocalizedValues {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (locale, value) in &self.entries {
			map.serialize_entry(locale, value)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for LocalizedValues {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct ValuesVisitor;

		impl<'de> Visitor<'de> for ValuesVisitor {
			type Value = LocalizedValues;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a map of locale to string")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
				let mut values = LocalizedValues::new();
				while let Some((locale, value)) = access.next_entry::<String, Option<String>>()? {
					values.set(locale, value.unwrap_or_default());
				}
				Ok(values)
			}
		}

		deserializer.deserialize_map(ValuesVisitor)
	}
}

/// Read access to a record that stores fields per locale.
///
/// Implementors only expose the stored values; all fallback logic lives in
/// [`crate::resolve`].
pub trait LocalizedRecord {
	/// All values stored for `field`, or `None` if the field was never set.
	fn localized_values(&self, field: &str) -> Option<&LocalizedValues>;

	/// Value of `field` in exactly `locale`.
	///
	/// Empty strings are reported as `None`: a blank value carries no data.
	fn value(&self, field: &str, locale: &str) -> Option<&str> {
		self.localized_values(field)
			.and_then(|values| values.get(locale))
			.filter(|value| !value.is_empty())
	}
}

impl LocalizedRecord for BTreeMap<String, LocalizedValues> {
	fn localized_values(&self, field: &str) -> Option<&LocalizedValues> {
		self.get(field)
	}
}

impl LocalizedRecord for HashMap<String, LocalizedValues> {
	fn localized_values(&self, field: &str) -> Option<&LocalizedValues> {
		self.get(field)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_replaces_in_place() {
		let mut values = LocalizedValues::new();
		values.set("en", "Jane");
		values.set("fr_CA", "Jeanne");
		values.set("en", "Janet");

		let pairs: Vec<_> = values.iter().collect();
		assert_eq!(pairs, vec![("en", "Janet"), ("fr_CA", "Jeanne")]);
	}

	#[test]
	fn remove_returns_old_value() {
		let mut values: LocalizedValues = [("en", "Jane"), ("de", "Johanna")].into_iter().collect();
		assert_eq!(values.remove("en"), Some("Jane".to_string()));
		assert_eq!(values.remove("en"), None);
		assert_eq!(values.locales().collect::<Vec<_>>(), vec!["de"]);
	}

	#[test]
	fn first_non_empty_skips_blank_values() {
		let values: LocalizedValues = [("en", ""), ("es", "Juana"), ("fr", "Jeanne")]
			.into_iter()
			.collect();
		assert_eq!(values.first_non_empty(), Some("Juana"));

		let blank: LocalizedValues = [("en", "")].into_iter().collect();
		assert_eq!(blank.first_non_empty(), None);
	}

	#[test]
	fn value_treats_empty_as_absent() {
		let mut record = BTreeMap::new();
		record.insert(
			"givenName".to_string(),
			[("en", ""), ("es", "Juana")].into_iter().collect::<LocalizedValues>(),
		);

		assert_eq!(record.value("givenName", "en"), None);
		assert_eq!(record.value("givenName", "es"), Some("Juana"));
		assert_eq!(record.value("givenName", "de"), None);
		assert_eq!(record.value("familyName", "es"), None);
	}

	#[test]
	fn deserialize_keeps_document_order() {
		let values: LocalizedValues =
			serde_json::from_str(r#"{"fr_CA": "Jeanne", "en": "Jane", "de": null}"#).unwrap();
		let pairs: Vec<_> = values.iter().collect();
		assert_eq!(pairs, vec![("fr_CA", "Jeanne"), ("en", "Jane"), ("de", "")]);

		let json = serde_json::to_string(&values).unwrap();
		assert_eq!(json, r#"{"fr_CA":"Jeanne","en":"Jane","de":""}"#);
	}
}
