//! # Validator Service
//!
//! Pipeline per call:
//!
//! ```text
//! schema (cached) -> required-field pass -> auxiliary checks -> raw parse -> render
//! ```
//!
//! The first auxiliary error stops the pipeline; required-field failures
//! never do.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use reqfield_core::{Diagnostics, Record, RecordType, ValidationTree};
use reqfield_parser::{RawParser, Render, Renderer};
use reqfield_schema::{Schema, SchemaCache, SchemaGenerator};
use reqfield_validator::{FieldChecks, RequiredFieldValidator};
use tracing::{debug, error};

use crate::auxiliary::{AuxiliaryCheck, AuxiliaryError, BoxedCheck};
use crate::config::{CacheMode, ConfiguredGenerator, ValidatorConfig};
use crate::error::ServiceError;

type PreparedMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Schema plus auxiliary checks for one record type, ready to run.
pub struct PreparedValidation<T: Record> {
    schema: Arc<Schema>,
    checks: Vec<BoxedCheck<T>>,
}

impl<T: Record> PreparedValidation<T> {
    /// The schema the validation runs against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Number of registered auxiliary checks.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Validate `instance` with `service`'s validator and renderer.
    ///
    /// # Errors
    ///
    /// Same as [`ValidatorService::validate_with_schema`].
    pub fn run<G, R>(&self, service: &ValidatorService<G, R>, instance: &T) -> Result<Option<R::Output>, ServiceError>
    where
        G: SchemaGenerator,
        R: Render,
    {
        let checks: Vec<&dyn AuxiliaryCheck<T>> = self
            .checks
            .iter()
            .map(|check| check.as_ref() as &dyn AuxiliaryCheck<T>)
            .collect();
        service.validate_with_schema(&self.schema, instance, &checks)
    }
}

impl<T: Record> fmt::Debug for PreparedValidation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedValidation")
            .field("type_name", &self.schema.type_name())
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Facade over schema generation, validation and rendering.
pub struct ValidatorService<G, R> {
    generator: G,
    renderer: R,
    validator: RequiredFieldValidator,
    raw_parser: RawParser,
    field_checks: FieldChecks,
    schemas: SchemaCache,
    prepared: RwLock<PreparedMap>,
    cache_mode: CacheMode,
    diagnostics: Diagnostics,
}

impl ValidatorService<ConfiguredGenerator, Renderer> {
    /// Build a service from configuration.
    pub fn from_config(config: &ValidatorConfig, diagnostics: Diagnostics) -> Self {
        ValidatorService::new(config.generator(&diagnostics), config.output, diagnostics)
            .with_cache_mode(config.cache)
            .with_field_checks(config.field_checks())
    }
}

impl<G: SchemaGenerator, R: Render> ValidatorService<G, R> {
    /// Create a caching service.
    pub fn new(generator: G, renderer: R, diagnostics: Diagnostics) -> Self {
        Self {
            generator,
            renderer,
            validator: RequiredFieldValidator::new(diagnostics.clone()),
            raw_parser: RawParser::new(diagnostics.clone()),
            field_checks: FieldChecks::default(),
            schemas: SchemaCache::new(),
            prepared: RwLock::new(HashMap::new()),
            cache_mode: CacheMode::Cached,
            diagnostics: diagnostics.for_component("validator_service"),
        }
    }

    /// Set the cache mode.
    pub fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    /// Set the field checks offered to auxiliary checks.
    pub fn with_field_checks(mut self, field_checks: FieldChecks) -> Self {
        self.field_checks = field_checks;
        self
    }

    /// Current cache mode.
    pub fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    /// Configured field checks.
    pub fn field_checks(&self) -> &FieldChecks {
        &self.field_checks
    }

    /// Auxiliary check recording malformed addresses under `field`.
    pub fn email_check<T: Record>(&self, field: &'static str, select: fn(&T) -> &str) -> BoxedCheck<T> {
        let checks = self.field_checks;
        Box::new(move |instance: &T, tree: &mut ValidationTree| -> Result<(), AuxiliaryError> {
            checks.email(field, select(instance), tree);
            Ok(())
        })
    }

    /// Auxiliary check recording non-alphanumeric usernames under `field`.
    pub fn username_check<T: Record>(&self, field: &'static str, select: fn(&T) -> &str) -> BoxedCheck<T> {
        let checks = self.field_checks;
        Box::new(move |instance: &T, tree: &mut ValidationTree| -> Result<(), AuxiliaryError> {
            checks.username(field, select(instance), tree);
            Ok(())
        })
    }

    /// Auxiliary check applying the configured [`PasswordPolicy`](reqfield_validator::PasswordPolicy).
    pub fn password_check<T: Record>(&self, field: &'static str, select: fn(&T) -> &str) -> BoxedCheck<T> {
        let checks = self.field_checks;
        Box::new(move |instance: &T, tree: &mut ValidationTree| -> Result<(), AuxiliaryError> {
            checks.password(field, select(instance), tree);
            Ok(())
        })
    }

    /// Auxiliary check applying the configured
    /// [`BirthdatePolicy`](reqfield_validator::BirthdatePolicy) against
    /// today's date. An absent date is left to the required-field pass.
    pub fn birthdate_check<T: Record>(
        &self,
        field: &'static str,
        select: fn(&T) -> Option<NaiveDate>,
    ) -> BoxedCheck<T> {
        let checks = self.field_checks;
        Box::new(move |instance: &T, tree: &mut ValidationTree| -> Result<(), AuxiliaryError> {
            if let Some(birthdate) = select(instance) {
                checks.birthdate(field, birthdate, tree);
            }
            Ok(())
        })
    }

    /// The schema cache. Empty in [`CacheMode::PerCall`].
    pub fn schema_cache(&self) -> &SchemaCache {
        &self.schemas
    }

    /// The schema for `T`, from the cache when enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Schema`] if the schema cannot be derived.
    pub fn schema_for<T: Record>(&self) -> Result<Arc<Schema>, ServiceError> {
        let record = RecordType::of::<T>();
        let schema = match self.cache_mode {
            CacheMode::Cached => self.schemas.get_or_build(&self.generator, record)?,
            CacheMode::PerCall => Arc::new(self.generator.build(record)?),
        };
        Ok(schema)
    }

    /// Validate `instance`, then run `checks` in order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for schema, consistency and rendering faults
    /// and for the first auxiliary check that fails to run.
    pub fn validate<T: Record>(
        &self,
        instance: &T,
        checks: &[&dyn AuxiliaryCheck<T>],
    ) -> Result<Option<R::Output>, ServiceError> {
        let schema = self.schema_for::<T>()?;
        self.validate_with_schema(&schema, instance, checks)
    }

    /// Validate `instance` against an explicit schema.
    ///
    /// # Errors
    ///
    /// Same as [`ValidatorService::validate`]. A schema derived from another
    /// type yields [`ServiceError::Validate`].
    pub fn validate_with_schema<T: Record>(
        &self,
        schema: &Schema,
        instance: &T,
        checks: &[&dyn AuxiliaryCheck<T>],
    ) -> Result<Option<R::Output>, ServiceError> {
        let mut tree = ValidationTree::new(schema.type_name());
        self.validator.validate(instance, schema, &mut tree)?;

        for (index, check) in checks.iter().enumerate() {
            if let Err(err) = check.check(instance, &mut tree) {
                self.diagnostics.emit(|component| {
                    error!(
                        component = component,
                        struct_type = schema.type_name(),
                        check_index = index,
                        error = %err,
                        "auxiliary check failed"
                    );
                });
                return Err(err.into());
            }
        }

        self.diagnostics.emit(|component| {
            debug!(
                component = component,
                struct_type = schema.type_name(),
                has_failed = tree.has_failed(),
                error_count = tree.error_count(),
                "validation finished"
            );
        });

        self.parse_validations(&tree)
    }

    /// Run both parser stages over `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Parse`] if the renderer rejects the tree.
    pub fn parse_validations(&self, tree: &ValidationTree) -> Result<Option<R::Output>, ServiceError> {
        match self.raw_parser.parse(tree) {
            None => Ok(None),
            Some(parsed) => Ok(Some(self.renderer.render(&parsed)?)),
        }
    }

    /// Bundle the schema for `T` with `checks` for repeated use.
    ///
    /// In [`CacheMode::Cached`] the first preparation for a type is stored
    /// and returned to every later caller; their `checks` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Schema`] if the schema cannot be derived.
    pub fn prepare<T: Record>(&self, checks: Vec<BoxedCheck<T>>) -> Result<Arc<PreparedValidation<T>>, ServiceError> {
        let type_id = TypeId::of::<T>();
        if self.cache_mode == CacheMode::Cached {
            if let Some(existing) = self.prepared_for::<T>(type_id) {
                return Ok(existing);
            }
        }

        let prepared = Arc::new(PreparedValidation {
            schema: self.schema_for::<T>()?,
            checks,
        });
        if self.cache_mode == CacheMode::PerCall {
            return Ok(prepared);
        }

        let stored = {
            let mut guard = self.prepared.write();
            let entry = guard
                .entry(type_id)
                .or_insert_with(|| Arc::clone(&prepared) as Arc<dyn Any + Send + Sync>);
            Arc::clone(entry)
        };
        Ok(stored.downcast::<PreparedValidation<T>>().unwrap_or(prepared))
    }

    fn prepared_for<T: Record>(&self, type_id: TypeId) -> Option<Arc<PreparedValidation<T>>> {
        let entry = self.prepared.read().get(&type_id).cloned()?;
        entry.downcast::<PreparedValidation<T>>().ok()
    }

    /// Drop every cached schema and prepared validation.
    pub fn clear_cache(&self) {
        self.schemas.clear();
        self.prepared.write().clear();
    }
}

impl<G: fmt::Debug, R: fmt::Debug> fmt::Debug for ValidatorService<G, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorService")
            .field("generator", &self.generator)
            .field("renderer", &self.renderer)
            .field("cache_mode", &self.cache_mode)
            .field("cached_schemas", &self.schemas.len())
            .field("prepared", &self.prepared.read().len())
            .finish()
    }
}
