use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::ds::error::ModelError;
use crate::ds::operations::test_and_comparison::same_value;
use crate::ds::symbol::SymbolData;
use crate::ds::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}

/// A native accessor function. The first argument is the receiver the
/// lookup started from, not the object the accessor is stored on.
pub type AccessorFn = dyn Fn(&Value, Vec<Value>) -> Result<Value, ModelError>;

#[derive(Clone)]
pub enum PropertyDescriptor {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<Rc<AccessorFn>>,
        set: Option<Rc<AccessorFn>>,
        enumerable: bool,
        configurable: bool,
    },
}

impl PropertyDescriptor {
    pub fn new_data(value: Value) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub(crate) fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub(crate) fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    pub(crate) fn is_data_descriptor(&self) -> bool {
        match self {
            PropertyDescriptor::Data { .. } => true,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }
}

fn same_accessor(a: &Option<Rc<AccessorFn>>, b: &Option<Rc<AccessorFn>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PropertyDescriptor::Data {
                    value,
                    writable,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Data {
                    value: other_value,
                    writable: other_writable,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_value(value, other_value)
                    && writable == other_writable
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            (
                PropertyDescriptor::Accessor {
                    get,
                    set,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Accessor {
                    get: other_get,
                    set: other_set,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_accessor(get, other_get)
                    && same_accessor(set, other_set)
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            _ => false,
        }
    }
}
