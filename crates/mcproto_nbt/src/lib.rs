#![doc = include_str!("../README.md")]

pub use binary::{from_binary, from_binary_gzip_aware, to_binary};
pub use compound::Compound;
pub use error::{Error, Result};
pub use tag::Tag;
pub use value::{List, Value};

pub mod binary;
pub mod compound;
mod error;
mod tag;
pub mod value;

/// A convenience macro for constructing [`Compound`]s.
///
/// Key expressions must implement `Into<String>`, value expressions must
/// implement `Into<Value>`.
///
/// ```
/// use mcproto_nbt::{compound, List};
///
/// let c = compound! {
///     "byte" => 123_i8,
///     "list_of_int" => List::Int(vec![3, -7, 5]),
///     "string" => "hello",
/// };
/// ```
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Compound as ::std::iter::FromIterator<(::std::string::String, $crate::Value)>>::from_iter([
            $(
                (
                    ::std::convert::Into::<::std::string::String>::into($key),
                    ::std::convert::Into::<$crate::Value>::into($value)
                ),
            )*
        ])
    };
}
