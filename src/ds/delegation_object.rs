//! The synthetic intermediary that gives a single-prototype object model
//! multiple parents.
//!
//! A delegation node sits in an object's native prototype slot and keeps
//! an ordered, deduplicated list of delegate objects. Named-property
//! reads (`get`, `has_property`, `describe_property`) consult the node's
//! own backing storage first and then each delegate in priority order.
//! Shape queries (`own_property_keys`, `get_prototype_of`,
//! `is_extensible`) and all mutations answer from the node's own storage
//! alone, so the node stays self-consistent to the rest of the model.

use std::cell::RefCell;
use std::collections::HashSet;
use std::mem;
use std::rc::{Rc, Weak};

use crate::ds::error::ModelError;
use crate::ds::object::{
    apply_descriptor, ordinary_define_own_property, MetaObject, ObjectBase, ObjectType,
    SharedObject,
};
use crate::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::ds::symbol::{DELEGATION_SELF_MARKER, DELEGATION_TYPE_TAG};
use crate::ds::value::Value;

pub const DELEGATION_TAG: &str = "delegation";

/// Debug record of a node: its type tag and a snapshot of the delegate
/// list at the time of the call.
#[derive(Clone)]
pub struct DelegationMetadata {
    pub tag: &'static str,
    pub delegates: Vec<SharedObject>,
}

pub struct DelegationBase {
    delegates: Vec<SharedObject>,
    self_ref: Option<Weak<RefCell<ObjectType>>>,
}

impl DelegationBase {
    pub fn new(initial_delegates: Vec<SharedObject>) -> Self {
        let mut base = DelegationBase {
            delegates: Vec::new(),
            self_ref: None,
        };
        base.merge_delegates(initial_delegates);
        base
    }

    pub fn delegates(&self) -> &[SharedObject] {
        &self.delegates
    }

    /// Concatenates, then keeps the first occurrence of each distinct
    /// handle. Re-adding a delegate never demotes its established
    /// priority, and the node itself never enters the list.
    pub fn merge_delegates(&mut self, new_delegates: Vec<SharedObject>) {
        if new_delegates.is_empty() {
            return;
        }
        let existing = mem::replace(&mut self.delegates, Vec::new());
        let mut seen: HashSet<*const RefCell<ObjectType>> =
            HashSet::with_capacity(existing.len() + new_delegates.len());
        let mut merged: Vec<SharedObject> =
            Vec::with_capacity(existing.len() + new_delegates.len());
        for candidate in existing.into_iter().chain(new_delegates.into_iter()) {
            if self.is_self(&candidate) {
                continue;
            }
            if !seen.insert(Rc::as_ptr(&candidate)) {
                continue;
            }
            merged.push(candidate);
        }
        self.delegates = merged;
    }

    /// Anchors the node's internal operations to its own identity rather
    /// than whatever wrapper the rest of the system sees. Weak, so the
    /// node is freed once its host object lets go of it.
    pub(crate) fn bind_self(&mut self, cell: &SharedObject) {
        self.self_ref = Some(Rc::downgrade(cell));
    }

    fn is_self(&self, candidate: &SharedObject) -> bool {
        match &self.self_ref {
            None => false,
            Some(marker) => marker.ptr_eq(&Rc::downgrade(candidate)),
        }
    }
}

pub trait DelegationObject: MetaObject {
    fn get_delegation_base(&self) -> &DelegationBase;

    fn get_delegation_base_mut(&mut self) -> &mut DelegationBase;

    fn as_delegation_object(&self) -> &dyn DelegationObject;

    fn as_delegation_object_mut(&mut self) -> &mut dyn DelegationObject;

    fn metadata(&self) -> DelegationMetadata {
        DelegationMetadata {
            tag: self.type_tag(),
            delegates: self.get_delegation_base().delegates().to_vec(),
        }
    }
}

pub struct CoreDelegationObject {
    base: ObjectBase,
    delegation_base: DelegationBase,
}

impl CoreDelegationObject {
    fn new(initial_delegates: Vec<SharedObject>) -> Self {
        CoreDelegationObject {
            base: ObjectBase::new(),
            delegation_base: DelegationBase::new(initial_delegates),
        }
    }
}

impl DelegationObject for CoreDelegationObject {
    fn get_delegation_base(&self) -> &DelegationBase {
        &self.delegation_base
    }

    fn get_delegation_base_mut(&mut self) -> &mut DelegationBase {
        &mut self.delegation_base
    }

    fn as_delegation_object(&self) -> &dyn DelegationObject {
        self
    }

    fn as_delegation_object_mut(&mut self) -> &mut dyn DelegationObject {
        self
    }
}

impl MetaObject for CoreDelegationObject {
    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn as_meta_object(&self) -> &dyn MetaObject {
        self
    }

    fn as_meta_object_mut(&mut self) -> &mut dyn MetaObject {
        self
    }

    fn get(&self, property: &PropertyKey, receiver: &Value) -> Result<Value, ModelError> {
        if let Some(descriptor) = self.get_own_property(property) {
            return apply_descriptor(descriptor, receiver);
        }
        for delegate in self.delegation_base.delegates() {
            let guard = (**delegate).borrow();
            let candidate = guard.as_meta_object();
            if candidate.has_property(property) {
                return candidate.get(property, receiver);
            }
        }
        Ok(Value::Undefined)
    }

    fn has_property(&self, property: &PropertyKey) -> bool {
        if self.get_object_base().properties.contains_key(property) {
            return true;
        }
        self.delegation_base
            .delegates()
            .iter()
            .any(|delegate| (**delegate).borrow().as_meta_object().has_property(property))
    }

    fn describe_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        if let Some(descriptor) = self.get_own_property(property) {
            return Some(descriptor.clone());
        }
        // own descriptors only, per host getOwnPropertyDescriptor semantics
        for delegate in self.delegation_base.delegates() {
            let guard = (**delegate).borrow();
            if let Some(descriptor) = guard.as_meta_object().get_own_property(property) {
                return Some(descriptor.clone());
            }
        }
        None
    }

    fn type_tag(&self) -> &'static str {
        DELEGATION_TAG
    }
}

/// Allocates a fresh node from zero or more initial delegates. An empty
/// list is valid; such a node is a no-op intermediary until merged into.
///
/// The returned handle is the node's public, wrapped form. The raw form
/// for internal bookkeeping is reached through
/// [`ObjectType::as_delegation_object`] on the same handle.
pub fn delegation_create(initial_delegates: Vec<SharedObject>) -> SharedObject {
    let node = CoreDelegationObject::new(initial_delegates);
    let cell: SharedObject = Rc::new(RefCell::new(ObjectType::Delegation(Box::new(node))));
    {
        let mut guard = (*cell).borrow_mut();
        if let ObjectType::Delegation(delegation) = &mut *guard {
            delegation.get_delegation_base_mut().bind_self(&cell);
            let raw = delegation.as_meta_object_mut();
            ordinary_define_own_property(
                raw,
                PropertyKey::Sym(DELEGATION_SELF_MARKER.clone()),
                PropertyDescriptor::Data {
                    value: Value::Boolean(true),
                    writable: false,
                    enumerable: false,
                    configurable: false,
                },
            );
            ordinary_define_own_property(
                raw,
                PropertyKey::Sym(DELEGATION_TYPE_TAG.clone()),
                PropertyDescriptor::Data {
                    value: Value::String(DELEGATION_TAG.to_string()),
                    writable: false,
                    enumerable: false,
                    configurable: false,
                },
            );
        }
    }
    cell
}

/// Debug-only: the internal key names a node keeps in its backing store.
/// Intended for test harnesses verifying they cannot collide with
/// user-visible property names.
pub fn bookkeeping_keys() -> Vec<PropertyKey> {
    vec![
        PropertyKey::Sym(DELEGATION_SELF_MARKER.clone()),
        PropertyKey::Sym(DELEGATION_TYPE_TAG.clone()),
    ]
}
