//! Column metadata and materialized rows.

use std::sync::Arc;

use xproto::Scalar;

/// Metadata describing one result set column.
///
/// Marked `#[non_exhaustive]` so the transport layer can gain fields
/// (type info, flags, collation) without breaking semver. Use
/// [`Column::new()`] and the builder methods to construct instances.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Column {
    /// Column name, as the server labels it.
    pub name: String,
    /// Collection or table the column originates from, when known.
    pub collection: Option<String>,
    /// Schema the originating collection lives in, when known.
    pub schema: Option<String>,
}

impl Column {
    /// Create a new column with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            schema: None,
        }
    }

    /// Set the originating collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the originating schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Shared column metadata for a result set.
///
/// Loaded once, before any row is read, and shared across every row so
/// the descriptors are never duplicated per row.
#[derive(Debug, Clone)]
pub struct ColMetaData {
    /// Column definitions, in result order.
    pub columns: Arc<[Column]>,
}

impl ColMetaData {
    /// Create new column metadata from a list of columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns: columns.into(),
        }
    }

    /// Get the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }
}

/// One materialized row: a fixed-arity sequence of decoded scalars.
///
/// The field count always equals the column count of the shared
/// metadata, and a row is never mutated once stored.
#[derive(Debug, Clone)]
pub struct Row {
    fields: Vec<Scalar>,
    metadata: Arc<ColMetaData>,
}

impl Row {
    /// Build a row over the shared metadata.
    pub(crate) fn new(fields: Vec<Scalar>, metadata: Arc<ColMetaData>) -> Self {
        Self { fields, metadata }
    }

    /// Get the number of fields in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the field at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scalar> {
        self.fields.get(index)
    }

    /// Check if the field at `index` is NULL. Out-of-range reads as NULL.
    #[must_use]
    pub fn is_null(&self, index: usize) -> bool {
        self.fields.get(index).is_none_or(Scalar::is_null)
    }

    /// Get the shared column metadata.
    #[must_use]
    pub fn metadata(&self) -> &Arc<ColMetaData> {
        &self.metadata
    }
}
