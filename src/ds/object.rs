use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ds::delegation_object::DelegationObject;
use crate::ds::error::ModelError;
use crate::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::ds::operations::test_and_comparison::{same_meta_object, same_value};
use crate::ds::value::Value;

pub type SharedObject = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(Box<dyn MetaObject>),
    Delegation(Box<dyn DelegationObject>),
}

impl ObjectType {
    pub fn as_meta_object(&self) -> &dyn MetaObject {
        match self {
            ObjectType::Ordinary(o) => o.as_meta_object(),
            ObjectType::Delegation(o) => o.as_meta_object(),
        }
    }

    pub fn as_meta_object_mut(&mut self) -> &mut dyn MetaObject {
        match self {
            ObjectType::Ordinary(o) => o.as_meta_object_mut(),
            ObjectType::Delegation(o) => o.as_meta_object_mut(),
        }
    }

    pub fn as_delegation_object(&self) -> Option<&dyn DelegationObject> {
        match self {
            ObjectType::Delegation(o) => Some(o.as_delegation_object()),
            _ => None,
        }
    }

    pub fn as_delegation_object_mut(&mut self) -> Option<&mut dyn DelegationObject> {
        match self {
            ObjectType::Delegation(o) => Some(o.as_delegation_object_mut()),
            _ => None,
        }
    }
}

pub struct ObjectBase {
    pub(crate) properties: HashMap<PropertyKey, PropertyDescriptor>,
    pub(crate) is_extensible: bool,
    pub(crate) prototype: Option<SharedObject>,
}

impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            is_extensible: true,
            prototype: None,
        }
    }
}

/// The fundamental-operation contract. One method per trapped operation;
/// the default bodies implement ordinary single-prototype semantics, and
/// the delegation node overrides exactly the named-property reads.
///
/// Writes are the one operation not on this trait: see
/// [`crate::ds::operations::object::set`], which must mutate the original
/// receiver at the end of a chain walk.
pub trait MetaObject {
    fn get_object_base(&self) -> &ObjectBase;

    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn as_meta_object(&self) -> &dyn MetaObject;

    fn as_meta_object_mut(&mut self) -> &mut dyn MetaObject;

    fn get_prototype_of(&self) -> Option<SharedObject> {
        match &self.get_object_base().prototype {
            None => None,
            Some(p) => Some(p.clone()),
        }
    }

    fn set_prototype_of(&mut self, prototype: Option<SharedObject>) -> bool {
        let new_value = match prototype {
            None => {
                self.get_object_base_mut().prototype = None;
                return true;
            }
            Some(p) => p,
        };
        if !self.is_extensible() {
            return false;
        }
        let mut cursor = Some(new_value.clone());
        while let Some(current) = cursor {
            cursor = match current.try_borrow() {
                // A chain member that cannot be borrowed is the object
                // being mutated: the new chain loops back to us.
                Err(_) => return false,
                Ok(guard) => {
                    let ancestor = guard.as_meta_object();
                    if same_meta_object(ancestor, self.as_meta_object()) {
                        return false;
                    }
                    ancestor.get_prototype_of()
                }
            };
        }
        self.get_object_base_mut().prototype = Some(new_value);
        true
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.get_object_base().properties.get(property)
    }

    /// Owned descriptor lookup, so implementations may answer from storage
    /// they cannot hand out borrows into.
    fn describe_property(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        match self.get_own_property(property) {
            None => None,
            Some(descriptor) => Some(descriptor.clone()),
        }
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        ordinary_define_own_property(self, property, descriptor)
    }

    fn has_property(&self, property: &PropertyKey) -> bool {
        if self.get_object_base().properties.contains_key(property) {
            true
        } else {
            match &self.get_object_base().prototype {
                None => false,
                Some(p) => (**p).borrow().as_meta_object().has_property(property),
            }
        }
    }

    fn get(&self, property: &PropertyKey, receiver: &Value) -> Result<Value, ModelError> {
        match self.get_own_property(property) {
            None => match self.get_prototype_of() {
                None => Ok(Value::Undefined),
                Some(p) => (*p).borrow().as_meta_object().get(property, receiver),
            },
            Some(descriptor) => apply_descriptor(descriptor, receiver),
        }
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        let configurable = match self.get_own_property(property) {
            None => return true,
            Some(descriptor) => descriptor.is_configurable(),
        };
        if configurable {
            self.get_object_base_mut().properties.remove(property);
            true
        } else {
            false
        }
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        let mut sym_keys = vec![];
        for key in self.get_object_base().properties.keys() {
            match key {
                PropertyKey::Int(d) => int_keys.push(*d),
                PropertyKey::Str(d) => str_keys.push(d.clone()),
                PropertyKey::Sym(d) => sym_keys.push(d.clone()),
            }
        }
        int_keys.sort();
        str_keys.sort();
        sym_keys.sort_by(|a, b| a.description().cmp(b.description()));

        let mut result = Vec::with_capacity(int_keys.len() + str_keys.len() + sym_keys.len());
        result.extend(int_keys.into_iter().map(PropertyKey::Int));
        result.extend(str_keys.into_iter().map(PropertyKey::Str));
        result.extend(sym_keys.into_iter().map(PropertyKey::Sym));
        result
    }

    fn type_tag(&self) -> &'static str {
        "object"
    }
}

pub struct CoreObject {
    base: ObjectBase,
}

impl CoreObject {
    pub fn new() -> Self {
        CoreObject {
            base: ObjectBase::new(),
        }
    }

    pub fn new_shared(prototype: Option<SharedObject>) -> SharedObject {
        let mut object = CoreObject::new();
        object.base.prototype = prototype;
        Rc::new(RefCell::new(ObjectType::Ordinary(Box::new(object))))
    }
}

impl MetaObject for CoreObject {
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
}

pub(crate) fn apply_descriptor(
    descriptor: &PropertyDescriptor,
    receiver: &Value,
) -> Result<Value, ModelError> {
    match descriptor {
        PropertyDescriptor::Data { value, .. } => Ok(value.clone()),
        PropertyDescriptor::Accessor { get, .. } => match get {
            None => Ok(Value::Undefined),
            Some(getter) => getter(receiver, Vec::new()),
        },
    }
}

pub fn ordinary_define_own_property<J: MetaObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    match o.get_own_property(&property) {
        None => {
            if !o.is_extensible() {
                return false;
            }
        }
        Some(current) => {
            if !current.is_configurable() {
                if descriptor.is_configurable() {
                    return false;
                }
                if current.is_enumerable() != descriptor.is_enumerable() {
                    return false;
                }
                if current.is_data_descriptor() != descriptor.is_data_descriptor() {
                    return false;
                }
                match (current, &descriptor) {
                    (
                        PropertyDescriptor::Data {
                            value: current_value,
                            writable: current_writable,
                            ..
                        },
                        PropertyDescriptor::Data {
                            value: new_value,
                            writable: new_writable,
                            ..
                        },
                    ) => {
                        if !*current_writable {
                            if *new_writable {
                                return false;
                            }
                            if !same_value(current_value, new_value) {
                                return false;
                            }
                        }
                    }
                    _ => {
                        // non-configurable accessors must keep both functions
                        if current != &descriptor {
                            return false;
                        }
                    }
                }
            }
        }
    }
    o.get_object_base_mut().properties.insert(property, descriptor);
    true
}
