//! # Record Introspection
//!
//! Rust has no runtime reflection, so record types describe themselves.
//!
//! - [`Introspect`] carries the static field table: name, declared kind and
//!   tag text, in declaration order. Schema generation reads only this.
//! - [`RecordValue`] gives access to a live instance's field values and is
//!   object safe, so nested records can be walked as `&dyn RecordValue`.
//!
//! Both are normally generated with [`impl_record!`](crate::impl_record):
//!
//! ```
//! use reqfield_core::{impl_record, Introspect};
//!
//! #[derive(Default)]
//! struct Profile {
//!     bio: String,
//! }
//!
//! #[derive(Default)]
//! struct SignUp {
//!     email: String,
//!     profile: Option<Box<Profile>>,
//!     nonce: u64,
//! }
//!
//! impl_record!(Profile {
//!     bio: scalar => r#"json:"bio,omitempty""#,
//! });
//!
//! impl_record!(SignUp {
//!     email: scalar => r#"json:"email""#,
//!     profile: optional_record(Profile) => r#"json:"profile""#,
//!     nonce: private,
//! });
//!
//! assert_eq!(SignUp::FIELDS.len(), 3);
//! ```
//!
//! ## Field shapes
//!
//! | Shape                 | Rust type              | [`FieldKind`]       |
//! |-----------------------|------------------------|---------------------|
//! | `scalar`              | `T: Default + PartialEq` | `Scalar`          |
//! | `optional`            | `Option<T>`            | `NullableScalar`    |
//! | `record(R)`           | `R: Default + PartialEq` | `Record`          |
//! | `optional_record(R)`  | `Option<R>` / `Option<Box<R>>` | `NullableRecord` |
//! | `one_of`              | `Option<E>`            | `OneOf`             |
//! | `private`             | anything               | not visible         |

use std::any::TypeId;
use std::fmt;

use crate::tag::StructTag;

// ─── Static Metadata ─────────────────────────────────────────────────

/// Static description of a record type's fields.
pub trait Introspect: 'static {
    /// Type name used in diagnostics and parsed reports.
    const NAME: &'static str;

    /// Every declared field, externally visible or not, in declaration order.
    const FIELDS: &'static [FieldInfo];
}

/// The declared kind of a field.
///
/// Record-valued kinds carry a constructor for the nested type's
/// [`RecordType`], so a schema can be derived without an instance.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A plain value compared against its default.
    Scalar,
    /// An optional plain value; only null-ness matters.
    NullableScalar,
    /// A record stored inline.
    Record(fn() -> RecordType),
    /// An optional (possibly boxed) record.
    NullableRecord(fn() -> RecordType),
    /// A tagged union choice stored as an optional value.
    OneOf,
}

impl FieldKind {
    /// The nested record type, if this kind holds a record.
    pub fn nested_type(&self) -> Option<RecordType> {
        match self {
            Self::Record(ty) | Self::NullableRecord(ty) => Some(ty()),
            Self::Scalar | Self::NullableScalar | Self::OneOf => None,
        }
    }

    /// True for `NullableScalar`, `NullableRecord` and `OneOf`.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Self::NullableScalar | Self::NullableRecord(_) | Self::OneOf
        )
    }

    /// Short label used in diagnostic events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::NullableScalar => "nullable_scalar",
            Self::Record(_) => "record",
            Self::NullableRecord(_) => "nullable_record",
            Self::OneOf => "one_of",
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    kind: FieldKind,
    tag: &'static str,
    exported: bool,
}

impl FieldInfo {
    /// An externally visible field.
    pub const fn new(name: &'static str, kind: FieldKind, tag: &'static str) -> Self {
        Self {
            name,
            kind,
            tag,
            exported: true,
        }
    }

    /// A field that is not externally visible. It carries no tag and is
    /// never part of a schema.
    pub const fn private(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
            tag: "",
            exported: false,
        }
    }

    /// Internal (Rust) field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Parsed view over the tag text.
    pub fn tag(&self) -> StructTag<'static> {
        StructTag::new(self.tag)
    }

    /// Whether the field is externally visible.
    pub fn is_exported(&self) -> bool {
        self.exported
    }
}

/// Runtime handle for a record type: name, identity and field table.
#[derive(Clone, Copy)]
pub struct RecordType {
    name: &'static str,
    type_id: TypeId,
    fields: &'static [FieldInfo],
}

impl RecordType {
    /// The handle for `T`.
    pub fn of<T: Introspect>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            fields: T::FIELDS,
        }
    }

    /// Type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stable type identifier, used as cache key.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    /// Look up a declared field by internal name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

// ─── Live Values ─────────────────────────────────────────────────────

/// Access to a live record instance.
pub trait RecordValue {
    /// The runtime type handle of this instance.
    fn record_type(&self) -> RecordType;

    /// The current value of the field with the given internal name.
    ///
    /// Returns `None` for unknown and non-visible fields.
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>>;

    /// True if every visible field holds its zero value.
    ///
    /// Fields hidden from introspection are not consulted. An inline record
    /// field is judged by [`FieldValue::record`], which compares the whole
    /// value against its default instead.
    fn is_zero(&self) -> bool {
        self.record_type()
            .fields()
            .iter()
            .filter_map(|f| self.field_value(f.name()))
            .all(|v| v.is_zero())
    }
}

impl<R: RecordValue + ?Sized> RecordValue for Box<R> {
    fn record_type(&self) -> RecordType {
        (**self).record_type()
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        (**self).field_value(field)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

/// A record type with both static metadata and live value access.
///
/// Blanket-implemented; this is the bound used by generic entry points.
pub trait Record: Introspect + RecordValue {}

impl<T: Introspect + RecordValue> Record for T {}

/// Snapshot of one field's current value, as far as validation cares.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// A plain value and whether it equals its default.
    Scalar {
        /// The value equals `Default::default()`.
        is_zero: bool,
    },
    /// An optional plain value or union choice.
    Nullable {
        /// The value is `None`.
        is_null: bool,
    },
    /// A record stored inline and whether it equals its default, private
    /// fields included.
    Record {
        /// The record itself.
        record: &'a dyn RecordValue,
        /// The value equals `Default::default()`.
        is_zero: bool,
    },
    /// An optional record.
    NullableRecord(Option<&'a dyn RecordValue>),
}

impl<'a> FieldValue<'a> {
    /// A plain value, compared against its default.
    pub fn scalar<T: Default + PartialEq>(value: &T) -> Self {
        Self::Scalar {
            is_zero: *value == T::default(),
        }
    }

    /// An optional plain value.
    pub fn option<T>(value: &Option<T>) -> Self {
        Self::Nullable {
            is_null: value.is_none(),
        }
    }

    /// A record stored inline, compared against its default.
    pub fn record<R: RecordValue + Default + PartialEq>(value: &'a R) -> Self {
        Self::Record {
            record: value,
            is_zero: *value == R::default(),
        }
    }

    /// An optional record, boxed or not.
    pub fn optional_record<P: RecordValue>(value: &'a Option<P>) -> Self {
        Self::NullableRecord(value.as_ref().map(|r| r as &dyn RecordValue))
    }

    /// True for the zero value of a non-nullable field or a null nullable one.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Scalar { is_zero } => *is_zero,
            Self::Nullable { is_null } => *is_null,
            Self::Record { is_zero, .. } => *is_zero,
            Self::NullableRecord(record) => record.is_none(),
        }
    }

    /// The record behind this value, if it holds a non-null record.
    pub fn as_record(&self) -> Option<&'a dyn RecordValue> {
        match self {
            Self::Record { record, .. } => Some(*record),
            Self::NullableRecord(record) => *record,
            Self::Scalar { .. } | Self::Nullable { .. } => None,
        }
    }

    /// True if this value is a nullable reference of any kind.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable { .. } | Self::NullableRecord(_))
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { is_zero } => f.debug_struct("Scalar").field("is_zero", is_zero).finish(),
            Self::Nullable { is_null } => f.debug_struct("Nullable").field("is_null", is_null).finish(),
            Self::Record { record, is_zero } => f
                .debug_struct("Record")
                .field("type_name", &record.record_type().name())
                .field("is_zero", is_zero)
                .finish(),
            Self::NullableRecord(Some(record)) => f
                .debug_tuple("NullableRecord")
                .field(&record.record_type().name())
                .finish(),
            Self::NullableRecord(None) => f.write_str("NullableRecord(null)"),
        }
    }
}

// ─── Generation ──────────────────────────────────────────────────────

/// Implement [`Introspect`] and [`RecordValue`] for a struct.
///
/// Each entry is `field: shape => "tag text"`. The tag may be omitted, in
/// which case it is empty and schema generation reports it as missing.
/// `private` fields take no tag.
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $( $field:ident : $shape:ident $( ( $inner:ty ) )? $( => $tag:literal )? ),* $(,)? }) => {
        impl $crate::Introspect for $ty {
            const NAME: &'static str = stringify!($ty);
            const FIELDS: &'static [$crate::FieldInfo] = &[
                $( $crate::__record_field_info!($field, $shape $( ( $inner ) )?, $( $tag )?), )*
            ];
        }

        impl $crate::RecordValue for $ty {
            fn record_type(&self) -> $crate::RecordType {
                $crate::RecordType::of::<Self>()
            }

            fn field_value(&self, field: &str) -> ::core::option::Option<$crate::FieldValue<'_>> {
                match field {
                    $( stringify!($field) => $crate::__record_field_value!($shape, &self.$field), )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_info {
    ($field:ident, private, ) => {
        $crate::FieldInfo::private(stringify!($field))
    };
    ($field:ident, scalar, $( $tag:literal )?) => {
        $crate::FieldInfo::new(stringify!($field), $crate::FieldKind::Scalar, $crate::__record_tag!($( $tag )?))
    };
    ($field:ident, optional, $( $tag:literal )?) => {
        $crate::FieldInfo::new(stringify!($field), $crate::FieldKind::NullableScalar, $crate::__record_tag!($( $tag )?))
    };
    ($field:ident, one_of, $( $tag:literal )?) => {
        $crate::FieldInfo::new(stringify!($field), $crate::FieldKind::OneOf, $crate::__record_tag!($( $tag )?))
    };
    ($field:ident, record ( $inner:ty ), $( $tag:literal )?) => {
        $crate::FieldInfo::new(
            stringify!($field),
            $crate::FieldKind::Record($crate::RecordType::of::<$inner>),
            $crate::__record_tag!($( $tag )?),
        )
    };
    ($field:ident, optional_record ( $inner:ty ), $( $tag:literal )?) => {
        $crate::FieldInfo::new(
            stringify!($field),
            $crate::FieldKind::NullableRecord($crate::RecordType::of::<$inner>),
            $crate::__record_tag!($( $tag )?),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_value {
    (private, $value:expr) => {
        ::core::option::Option::None
    };
    (scalar, $value:expr) => {
        ::core::option::Option::Some($crate::FieldValue::scalar($value))
    };
    (optional, $value:expr) => {
        ::core::option::Option::Some($crate::FieldValue::option($value))
    };
    (one_of, $value:expr) => {
        ::core::option::Option::Some($crate::FieldValue::option($value))
    };
    (record, $value:expr) => {
        ::core::option::Option::Some($crate::FieldValue::record($value))
    };
    (optional_record, $value:expr) => {
        ::core::option::Option::Some($crate::FieldValue::optional_record($value))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_tag {
    () => {
        ""
    };
    ($tag:literal) => {
        $tag
    };
}
