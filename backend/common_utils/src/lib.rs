//! Common utilities for the merchant registration form

// Local masking primitives, shaped after hyperswitch's `masking` crate
pub mod masking {
    use std::{fmt, marker::PhantomData};

    /// Formatting strategy applied when a [`Secret`] is debug-printed.
    pub trait Strategy<T> {
        fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    }

    /// Prints only the type name of the wrapped value.
    pub enum WithType {}

    impl<T> Strategy<T> for WithType {
        fn fmt(_val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "*** {} ***", std::any::type_name::<T>())
        }
    }

    /// A value that must never show up in clear in `Debug` output or logs.
    ///
    /// Serialization is transparent, so the value still reaches the API it is
    /// meant for.
    pub struct Secret<T, S = WithType> {
        inner: T,
        strategy: PhantomData<S>,
    }

    impl<T, S> Secret<T, S> {
        pub fn new(value: T) -> Self {
            Self {
                inner: value,
                strategy: PhantomData,
            }
        }
    }

    impl<T, S> From<T> for Secret<T, S> {
        fn from(value: T) -> Self {
            Self::new(value)
        }
    }

    impl<T: Clone, S> Clone for Secret<T, S> {
        fn clone(&self) -> Self {
            Self::new(self.inner.clone())
        }
    }

    impl<T: PartialEq, S> PartialEq for Secret<T, S> {
        fn eq(&self, other: &Self) -> bool {
            self.inner == other.inner
        }
    }

    impl<T: Eq, S> Eq for Secret<T, S> {}

    impl<T: Default, S> Default for Secret<T, S> {
        fn default() -> Self {
            Self::new(T::default())
        }
    }

    impl<T, S: Strategy<T>> fmt::Debug for Secret<T, S> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            S::fmt(&self.inner, f)
        }
    }

    impl<T: serde::Serialize, S> serde::Serialize for Secret<T, S> {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: serde::Serializer,
        {
            self.inner.serialize(serializer)
        }
    }

    impl<'de, T: serde::Deserialize<'de>, S> serde::Deserialize<'de> for Secret<T, S> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            T::deserialize(deserializer).map(Self::new)
        }
    }

    pub trait PeekInterface<T> {
        fn peek(&self) -> &T;
    }

    impl<T, S> PeekInterface<T> for Secret<T, S> {
        fn peek(&self) -> &T {
            &self.inner
        }
    }
}

pub use masking::{PeekInterface, Secret, Strategy, WithType};

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod pii;
pub mod request;

pub use errors::CustomResult;
