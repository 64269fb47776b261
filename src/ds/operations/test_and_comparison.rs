use std::ptr;
use std::rc::Rc;

use crate::ds::object::{MetaObject, SharedObject};
use crate::ds::value::Value;

/// Handle identity.
pub fn same_object_handle(a: &SharedObject, b: &SharedObject) -> bool {
    Rc::ptr_eq(a, b)
}

/// Storage identity, for when only trait references are at hand.
pub fn same_meta_object<J: MetaObject + ?Sized>(a: &J, b: &J) -> bool {
    ptr::eq(a.get_object_base(), b.get_object_base())
}

/// SameValue semantics: like `==` except NaN equals itself.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if a.is_nan() && b.is_nan() {
                true
            } else {
                a == b
            }
        }
        _ => a == b,
    }
}
