//! Runtime type-checking of call arguments.
//!
//! A [`TypedCallGuard`] wraps a function together with an explicit parameter
//! schema. Every call is validated against the schema before the function
//! runs: positional arguments are paired with parameters by position, keyword
//! arguments by name. On any mismatch the call fails with
//! [`Error::InvalidArgumentType`] and the function is never invoked.

use std::any::{Any, TypeId};
use std::fmt;

use crate::{Error, Result};

/// A declared parameter: name plus the runtime type it accepts.
pub struct Param {
    name: &'static str,
    ty: TypeId,
}

impl Param {
    pub fn of<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeId::of::<T>(),
        }
    }
}

/// A single argument value, type-erased.
///
/// The `Debug` rendering is captured at insertion so mismatch errors can show
/// the offending values without keeping the `Debug` bound on the stored box.
struct Arg {
    value: Box<dyn Any>,
    ty: TypeId,
    repr: String,
}

impl Arg {
    fn new<T: Any + fmt::Debug>(value: T) -> Self {
        Self {
            ty: TypeId::of::<T>(),
            repr: format!("{value:?}"),
            value: Box::new(value),
        }
    }
}

/// The positional and keyword arguments of one call.
#[derive(Default)]
pub struct CallArgs {
    positional: Vec<Arg>,
    keyword: Vec<(&'static str, Arg)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg<T: Any + fmt::Debug>(mut self, value: T) -> Self {
        self.positional.push(Arg::new(value));
        self
    }

    /// Appends a keyword argument.
    pub fn kwarg<T: Any + fmt::Debug>(mut self, name: &'static str, value: T) -> Self {
        self.keyword.push((name, Arg::new(value)));
        self
    }

    /// Resolves a parameter by position first, then by name.
    /// Wrapped functions use this to read their (already validated) arguments.
    pub fn get<T: Any>(&self, index: usize, name: &str) -> Option<&T> {
        if let Some(arg) = self.positional.get(index) {
            return arg.value.downcast_ref();
        }
        self.keyword
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, arg)| arg.value.downcast_ref())
    }

    fn render(&self) -> String {
        let positional = self
            .positional
            .iter()
            .map(|a| a.repr.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let keyword = self
            .keyword
            .iter()
            .map(|(n, a)| format!("{n}: {}", a.repr))
            .collect::<Vec<_>>()
            .join(", ");
        format!("({positional}) {{{keyword}}}")
    }
}

/// A function guarded by a parameter schema.
pub struct TypedCallGuard<R> {
    name: &'static str,
    params: Vec<Param>,
    func: Box<dyn Fn(&CallArgs) -> R>,
}

impl<R> TypedCallGuard<R> {
    pub fn new(
        name: &'static str,
        params: Vec<Param>,
        func: impl Fn(&CallArgs) -> R + 'static,
    ) -> Self {
        Self {
            name,
            params,
            func: Box::new(func),
        }
    }

    /// Validates `args` against the schema and, if everything matches,
    /// invokes the wrapped function and returns its result unchanged.
    pub fn call(&self, args: CallArgs) -> Result<R> {
        self.validate(&args)?;
        Ok((self.func)(&args))
    }

    fn validate(&self, args: &CallArgs) -> Result<()> {
        // Positional arguments pair with parameters by position; an excess
        // positional argument has no parameter to pair with and fails.
        let positional_ok = args
            .positional
            .iter()
            .enumerate()
            .all(|(i, arg)| self.params.get(i).is_some_and(|p| p.ty == arg.ty));

        // Keyword arguments pair by name; unknown names fail.
        let keyword_ok = args.keyword.iter().all(|(name, arg)| {
            self.params
                .iter()
                .find(|p| p.name == *name)
                .is_some_and(|p| p.ty == arg.ty)
        });

        if positional_ok && keyword_ok {
            Ok(())
        } else {
            Err(Error::InvalidArgumentType {
                func: self.name,
                args: args.render(),
            })
        }
    }
}
