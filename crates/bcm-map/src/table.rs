//! The mapping table: target field -> bound source header.
//!
//! The table is a partial function from field id to header. Binding an
//! already-occupied slot evicts the previous header and returns it to the
//! caller so it can go back to the pool; the table never reaches into the
//! pool itself, the coordinating session does.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use bcm_model::{FieldId, SourceHeader, TargetSchema};
use tracing::error;

use crate::error::{MapError, Result};

/// Bindings from target fields to consumed source headers.
#[derive(Debug, Clone)]
pub struct MappingTable {
    /// Valid target ids, fixed at construction from the schema.
    known_fields: BTreeSet<FieldId>,
    bindings: BTreeMap<FieldId, SourceHeader>,
}

impl MappingTable {
    /// Create an empty table accepting only the schema's field ids.
    pub fn for_schema(schema: &TargetSchema) -> Self {
        Self {
            known_fields: schema.fields().map(|f| f.id.clone()).collect(),
            bindings: BTreeMap::new(),
        }
    }

    /// Bind a header to a target field.
    ///
    /// If the field already had a header bound, that header is evicted and
    /// returned so the caller can restore it to the pool. Re-dropping onto
    /// an occupied slot therefore replaces, it never stacks and never
    /// leaks the previous occupant.
    pub fn bind(
        &mut self,
        field_id: &FieldId,
        header: SourceHeader,
    ) -> Result<Option<SourceHeader>> {
        if !self.known_fields.contains(field_id) {
            error!(field = %field_id, "bind refused: unknown target field");
            return Err(MapError::UnknownTargetField(field_id.clone()));
        }
        Ok(self.bindings.insert(field_id.clone(), header))
    }

    /// Remove and return the header bound to a field.
    pub fn unbind(&mut self, field_id: &FieldId) -> Result<SourceHeader> {
        match self.bindings.remove(field_id) {
            Some(header) => Ok(header),
            None => {
                error!(field = %field_id, "unbind refused: nothing bound");
                Err(MapError::NotBound(field_id.clone()))
            }
        }
    }

    pub fn is_bound(&self, field_id: &FieldId) -> bool {
        self.bindings.contains_key(field_id)
    }

    /// The header currently bound to a field, if any.
    pub fn bound_header(&self, field_id: &FieldId) -> Option<&SourceHeader> {
        self.bindings.get(field_id)
    }

    /// Remove all bindings, returning every header that was bound. The
    /// caller restores them to the pool; this is the operation behind
    /// "reset mapping".
    pub fn clear(&mut self) -> Vec<SourceHeader> {
        let drained = std::mem::take(&mut self.bindings);
        drained.into_values().collect()
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Bindings in field-id order, for deterministic display.
    pub fn bindings(&self) -> impl Iterator<Item = (&FieldId, &SourceHeader)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcm_model::{HeaderId, TargetSchema};

    fn header(id: &str, label: &str) -> SourceHeader {
        SourceHeader::new(HeaderId::new(id).unwrap(), label)
    }

    fn field(id: &str) -> FieldId {
        FieldId::new(id).unwrap()
    }

    #[test]
    fn bind_unknown_field_is_refused() {
        let mut table = MappingTable::for_schema(&TargetSchema::bigcommerce());
        let result = table.bind(&field("not_a_field"), header("header_0", "SKU"));
        assert_eq!(
            result,
            Err(MapError::UnknownTargetField(field("not_a_field")))
        );
        assert_eq!(table.bound_count(), 0);
    }

    #[test]
    fn rebind_evicts_and_returns_previous_occupant() {
        let mut table = MappingTable::for_schema(&TargetSchema::bigcommerce());
        let sku = field("sku");

        let evicted = table.bind(&sku, header("header_0", "SKU")).unwrap();
        assert!(evicted.is_none());

        let evicted = table.bind(&sku, header("header_1", "Item Code")).unwrap();
        assert_eq!(evicted.unwrap().label, "SKU");
        assert_eq!(table.bound_header(&sku).unwrap().label, "Item Code");
        assert_eq!(table.bound_count(), 1);
    }

    #[test]
    fn unbind_missing_binding_fails() {
        let mut table = MappingTable::for_schema(&TargetSchema::bigcommerce());
        assert_eq!(
            table.unbind(&field("price")),
            Err(MapError::NotBound(field("price")))
        );
    }

    #[test]
    fn clear_returns_all_bound_headers() {
        let mut table = MappingTable::for_schema(&TargetSchema::bigcommerce());
        table.bind(&field("name"), header("header_0", "Product Name")).unwrap();
        table.bind(&field("price"), header("header_1", "Price")).unwrap();

        let drained = table.clear();
        assert_eq!(drained.len(), 2);
        assert_eq!(table.bound_count(), 0);
        assert!(!table.is_bound(&field("name")));
    }
}
