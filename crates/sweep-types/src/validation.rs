//! TOML configuration validation utilities.
//!
//! Pluggable components (routing adapters in particular) declare the shape
//! of their configuration tables through [`ConfigSchema`], so malformed
//! deployments fail at startup rather than mid-settlement.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// A required field is missing.
	#[error("missing required field: {0}")]
	MissingField(String),
	/// A field holds an invalid value.
	#[error("invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// A field has the wrong TOML type.
	#[error("type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer { min: Option<i64>, max: Option<i64> },
	Boolean,
	Array(Box<FieldType>),
}

impl FieldType {
	fn check(&self, name: &str, value: &toml::Value) -> Result<(), ValidationError> {
		let mismatch = |expected: &str| ValidationError::TypeMismatch {
			field: name.to_string(),
			expected: expected.to_string(),
			actual: value.type_str().to_string(),
		};

		match self {
			FieldType::String if !value.is_str() => Err(mismatch("string")),
			FieldType::Boolean if !value.is_bool() => Err(mismatch("boolean")),
			FieldType::Integer { min, max } => {
				let n = value.as_integer().ok_or_else(|| mismatch("integer"))?;
				let out_of_range = min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi);
				if out_of_range {
					return Err(ValidationError::InvalidValue {
						field: name.to_string(),
						message: format!("value {} outside allowed range", n),
					});
				}
				Ok(())
			}
			FieldType::Array(inner) => {
				let items = value.as_array().ok_or_else(|| mismatch("array"))?;
				for (i, item) in items.iter().enumerate() {
					inner.check(&format!("{}[{}]", name, i), item)?;
				}
				Ok(())
			}
			_ => Ok(()),
		}
	}
}

/// Type alias for field validator functions.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A field definition with name, type and optional custom validator.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		self.field_type.check(&self.name, value)?;
		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}
		Ok(())
	}
}

/// Schema definition with required and optional fields.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

/// Trait defining a configuration schema that can validate TOML values.
pub trait ConfigSchema: Send + Sync {
	/// Checks that required fields are present, types are correct, and
	/// values meet the schema's constraints.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(s: &str) -> toml::Value {
		toml::from_str(s).unwrap()
	}

	#[test]
	fn missing_required_field_is_rejected() {
		let schema = Schema::new(vec![Field::new("endpoint", FieldType::String)], vec![]);
		let err = schema.validate(&parse("other = 1")).unwrap_err();
		assert!(matches!(err, ValidationError::MissingField(f) if f == "endpoint"));
	}

	#[test]
	fn integer_range_is_enforced() {
		let schema = Schema::new(
			vec![Field::new(
				"confirmations",
				FieldType::Integer {
					min: Some(1),
					max: Some(12),
				},
			)],
			vec![],
		);
		assert!(schema.validate(&parse("confirmations = 6")).is_ok());
		assert!(schema.validate(&parse("confirmations = 0")).is_err());
		assert!(schema.validate(&parse("confirmations = 13")).is_err());
	}

	#[test]
	fn custom_validator_runs_after_type_check() {
		let schema = Schema::new(
			vec![
				Field::new("address", FieldType::String).with_validator(|v| {
					let s = v.as_str().unwrap();
					if s.starts_with("0x") && s.len() == 42 {
						Ok(())
					} else {
						Err("must be a 0x-prefixed 20-byte hex address".to_string())
					}
				}),
			],
			vec![],
		);
		assert!(schema
			.validate(&parse(&format!("address = \"0x{}\"", "11".repeat(20))))
			.is_ok());
		assert!(schema.validate(&parse("address = \"nope\"")).is_err());
		assert!(schema.validate(&parse("address = 5")).is_err());
	}

	#[test]
	fn arrays_check_every_element() {
		let schema = Schema::new(
			vec![Field::new(
				"sponsors",
				FieldType::Array(Box::new(FieldType::String)),
			)],
			vec![],
		);
		assert!(schema.validate(&parse("sponsors = [\"a\", \"b\"]")).is_ok());
		assert!(schema.validate(&parse("sponsors = [\"a\", 2]")).is_err());
	}
}
