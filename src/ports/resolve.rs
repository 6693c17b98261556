// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolution visitor.
//!
//! [`Resolve`] is implemented once per shape a configuration value can take:
//! strings, records, maps, sequences, optional and boxed values, and scalars.
//! Records opt in through the [`resolvable!`](crate::resolvable) macro, which lists
//! every field in declaration order. Fields marked `skip` are never touched.
//!
//! [`Record`] marks the types that may be handed to the resolver as a root.

use crate::domain::Result;
use crate::service::Resolver;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

/// A value whose strings can be resolved in place.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::MapEnv;
/// use cfgref::ports::Resolve;
/// use cfgref::service::Resolver;
///
/// let env = MapEnv::from_iter([("HOST", "db.internal")]);
/// let resolver = Resolver::new(&env, "");
///
/// let mut hosts = vec!["#ENV:HOST".to_string(), "localhost".to_string()];
/// hosts.resolve_with(&resolver).unwrap();
/// assert_eq!(hosts, ["db.internal", "localhost"]);
/// ```
pub trait Resolve {
    /// Replaces every indirection reachable from `self` with its resolved value.
    ///
    /// The first error aborts the walk. Values visited before the error keep their
    /// resolved contents.
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()>;
}

/// A value that may be the root of a resolution.
///
/// Typed records are roots by construction. Dynamic document values check their
/// shape at runtime and report a usage error unless they hold an object.
pub trait Record: Resolve {
    /// Fails if this value cannot act as a configuration root.
    fn ensure_record(&self) -> Result<()> {
        Ok(())
    }
}

impl Resolve for String {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        // An empty string means "absent", never an indirection
        if self.is_empty() {
            return Ok(());
        }
        if let Some(resolved) = resolver.resolve_indirection(self)? {
            if resolved != *self {
                *self = resolved;
            }
        }
        Ok(())
    }
}

impl<T: Resolve> Resolve for Option<T> {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        match self {
            Some(value) => value.resolve_with(resolver),
            None => Ok(()),
        }
    }
}

impl<T: Resolve + ?Sized> Resolve for Box<T> {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        (**self).resolve_with(resolver)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn ensure_record(&self) -> Result<()> {
        (**self).ensure_record()
    }
}

impl<T: Resolve> Resolve for Vec<T> {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.as_mut_slice().resolve_with(resolver)
    }
}

impl<T: Resolve> Resolve for [T] {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.iter_mut()
            .try_for_each(|item| item.resolve_with(resolver))
    }
}

impl<T: Resolve, const N: usize> Resolve for [T; N] {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.as_mut_slice().resolve_with(resolver)
    }
}

impl<T: Resolve> Resolve for VecDeque<T> {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.iter_mut()
            .try_for_each(|item| item.resolve_with(resolver))
    }
}

/// Resolves a map value on a scratch copy and swaps it in on success.
///
/// A failed entry is left exactly as it was.
pub(crate) fn resolve_copy_on_write<V: Resolve + Clone>(
    value: &mut V,
    resolver: &Resolver<'_>,
) -> Result<()> {
    let mut scratch = value.clone();
    scratch.resolve_with(resolver)?;
    *value = scratch;
    Ok(())
}

impl<K, V, S> Resolve for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Resolve + Clone,
    S: BuildHasher,
{
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.values_mut()
            .try_for_each(|value| resolve_copy_on_write(value, resolver))
    }
}

impl<K: Ord, V: Resolve + Clone> Resolve for BTreeMap<K, V> {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        self.values_mut()
            .try_for_each(|value| resolve_copy_on_write(value, resolver))
    }
}

macro_rules! impl_resolve_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Resolve for $ty {
                fn resolve_with(&mut self, _resolver: &Resolver<'_>) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

impl_resolve_scalar!(
    bool,
    char,
    (),
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    std::path::PathBuf,
    std::time::Duration,
    std::net::IpAddr,
    std::net::SocketAddr,
);

/// Implements [`Resolve`](crate::ports::Resolve) and [`Record`](crate::ports::Record)
/// for one or more structs.
///
/// Each struct names every one of its fields, in declaration order, and fields are
/// visited in that order. A field written as `name: skip` is left untouched and need
/// not implement `Resolve`. Every other field must implement `Resolve`.
///
/// The struct is destructured without `..`, so a field missing from the list is a
/// compile error rather than a silently unresolved value.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::MapEnv;
/// use cfgref::resolvable;
/// use cfgref::service::Resolver;
///
/// #[derive(Clone, Default)]
/// struct Database {
///     url: String,
///     pool_size: u32,
/// }
///
/// #[derive(Default)]
/// struct Config {
///     name: String,
///     database: Database,
///     internal: std::cell::Cell<u8>,
/// }
///
/// resolvable!(Database { url, pool_size });
/// resolvable!(Config { name, database, internal: skip });
///
/// let env = MapEnv::from_iter([("DB_URL", "postgres://db")]);
/// let mut config = Config {
///     database: Database { url: "#ENV:DB_URL".into(), pool_size: 4 },
///     ..Default::default()
/// };
/// Resolver::new(&env, "").resolve_root(&mut config).unwrap();
/// assert_eq!(config.database.url, "postgres://db");
/// ```
///
/// Leaving a field out does not compile:
///
/// ```compile_fail
/// use cfgref::resolvable;
///
/// struct Config {
///     host: String,
///     password: String,
/// }
///
/// resolvable!(Config { host });
/// ```
#[macro_export]
macro_rules! resolvable {
    (@visit $field:ident, $resolver:ident) => {
        $crate::ports::Resolve::resolve_with($field, $resolver)?;
    };
    (@visit $field:ident, $resolver:ident, skip) => {
        let _ = $field;
    };
    ($($ty:path { $($field:ident $(: $mode:ident)?),* $(,)? })+) => {
        $(
            impl $crate::ports::Resolve for $ty {
                fn resolve_with(
                    &mut self,
                    resolver: &$crate::service::Resolver<'_>,
                ) -> $crate::domain::Result<()> {
                    let $ty { $($field),* } = self;
                    $(
                        $crate::resolvable!(@visit $field, resolver $(, $mode)?);
                    )*
                    let _ = resolver;
                    Ok(())
                }
            }

            impl $crate::ports::Record for $ty {}
        )+
    };
}
