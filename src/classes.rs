//! DXF class definitions.
//!
//! Classes extend the fixed object type codes with types defined by the
//! drawing itself. An object whose type code has no fixed meaning is looked
//! up here by its class number.

use indexmap::IndexMap;

use crate::io::dwg::constants::classes::{CLASS_NUMBER_BASE, ENTITY_ITEM_CLASS_ID};

/// One entry of the `AcDb:Classes` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfClass {
    /// Type code used by objects of this class.
    pub class_number: i16,
    /// Proxy capability flags (stored as "version" before R14).
    pub version: i16,
    pub application_name: String,
    pub cpp_class_name: String,
    pub dxf_name: String,
    pub was_zombie: bool,
    /// 0x1F2 for classes producing entities, 0x1F3 for plain objects.
    pub item_class_id: i16,
}

impl DxfClass {
    /// Whether instances carry the entity prologue and are drawable.
    pub fn is_an_entity(&self) -> bool {
        self.item_class_id == ENTITY_ITEM_CLASS_ID
    }
}

/// Ordered class table keyed by class number.
#[derive(Debug, Clone, Default)]
pub struct DxfClassCollection {
    entries: IndexMap<i16, DxfClass>,
}

impl DxfClassCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. A later class with the same number replaces the earlier
    /// one but keeps its position.
    pub fn add_or_update(&mut self, class: DxfClass) {
        self.entries.insert(class.class_number, class);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DxfClass> {
        self.entries.values()
    }

    /// Class at a table position.
    pub fn get_index(&self, index: usize) -> Option<&DxfClass> {
        self.entries.get_index(index).map(|(_, c)| c)
    }

    pub fn get_by_class_number(&self, class_number: i16) -> Option<&DxfClass> {
        self.entries.get(&class_number)
    }

    /// Resolve an object type code through the table.
    ///
    /// The code is matched against class numbers first. Tables whose class
    /// numbers do not line up with the codes are resolved by position, the
    /// first class answering to code 500.
    pub fn get_by_type_code(&self, type_code: i16) -> Option<&DxfClass> {
        if type_code < CLASS_NUMBER_BASE {
            return None;
        }
        self.get_by_class_number(type_code)
            .or_else(|| self.get_index((type_code - CLASS_NUMBER_BASE) as usize))
    }
}
