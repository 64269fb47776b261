use std::rc::Rc;

use crate::ds::error::ModelError;
use crate::ds::object::{MetaObject, SharedObject};
use crate::ds::object_property::{AccessorFn, PropertyDescriptor, PropertyKey};
use crate::ds::value::Value;

pub fn get(o: &SharedObject, property: &PropertyKey) -> Result<Value, ModelError> {
    let receiver = Value::Object(o.clone());
    (**o).borrow().as_meta_object().get(property, &receiver)
}

pub fn has_property(o: &SharedObject, property: &PropertyKey) -> bool {
    (**o).borrow().as_meta_object().has_property(property)
}

pub fn describe_property(o: &SharedObject, property: &PropertyKey) -> Option<PropertyDescriptor> {
    (**o).borrow().as_meta_object().describe_property(property)
}

pub fn define_property(
    o: &SharedObject,
    property: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    (**o)
        .borrow_mut()
        .as_meta_object_mut()
        .define_own_property(property, descriptor)
}

pub fn create_data_property(o: &SharedObject, property: PropertyKey, value: Value) -> bool {
    define_property(o, property, PropertyDescriptor::new_data(value))
}

pub fn delete(o: &SharedObject, property: &PropertyKey) -> bool {
    (**o).borrow_mut().as_meta_object_mut().delete(property)
}

pub fn own_property_keys(o: &SharedObject) -> Vec<PropertyKey> {
    (**o).borrow().as_meta_object().own_property_keys()
}

pub fn get_prototype(o: &SharedObject) -> Option<SharedObject> {
    (**o).borrow().as_meta_object().get_prototype_of()
}

pub fn set_prototype(o: &SharedObject, prototype: Option<SharedObject>) -> bool {
    (**o)
        .borrow_mut()
        .as_meta_object_mut()
        .set_prototype_of(prototype)
}

pub fn is_extensible(o: &SharedObject) -> bool {
    (**o).borrow().as_meta_object().is_extensible()
}

pub fn prevent_extensions(o: &SharedObject) -> bool {
    (**o).borrow_mut().as_meta_object_mut().prevent_extensions()
}

enum SetDisposition {
    Data { writable: bool },
    Accessor { set: Option<Rc<AccessorFn>> },
    Missing,
}

/// Writes go through native single-prototype semantics only: the nearest
/// own descriptor along the native chain decides, and a plain write lands
/// as an own property of the original receiver. Delegates are never
/// searched and never mutated.
pub fn set(o: &SharedObject, property: PropertyKey, value: Value) -> Result<bool, ModelError> {
    let mut disposition = SetDisposition::Missing;
    let mut cursor = Some(o.clone());
    while let Some(current) = cursor {
        let guard = (*current).borrow();
        let meta = guard.as_meta_object();
        if let Some(descriptor) = meta.get_own_property(&property) {
            disposition = match descriptor {
                PropertyDescriptor::Data { writable, .. } => SetDisposition::Data {
                    writable: *writable,
                },
                PropertyDescriptor::Accessor { set, .. } => SetDisposition::Accessor {
                    set: set.clone(),
                },
            };
            break;
        }
        cursor = meta.get_prototype_of();
    }
    match disposition {
        SetDisposition::Accessor { set: None } => Ok(false),
        SetDisposition::Accessor { set: Some(setter) } => {
            let receiver = Value::Object(o.clone());
            setter(&receiver, vec![value])?;
            Ok(true)
        }
        SetDisposition::Data { writable: false } => Ok(false),
        SetDisposition::Data { writable: true } | SetDisposition::Missing => {
            let mut guard = (**o).borrow_mut();
            let meta = guard.as_meta_object_mut();
            let existing = match meta.get_own_property(&property) {
                None => None,
                Some(PropertyDescriptor::Accessor { .. }) => return Ok(false),
                Some(PropertyDescriptor::Data {
                    writable,
                    enumerable,
                    configurable,
                    ..
                }) => Some((*writable, *enumerable, *configurable)),
            };
            Ok(match existing {
                Some((false, _, _)) => false,
                Some((true, enumerable, configurable)) => meta.define_own_property(
                    property,
                    PropertyDescriptor::Data {
                        value,
                        writable: true,
                        enumerable,
                        configurable,
                    },
                ),
                None => meta.define_own_property(property, PropertyDescriptor::new_data(value)),
            })
        }
    }
}
