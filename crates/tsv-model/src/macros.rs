//! Declarative record definitions.

/// Declares a struct together with its [`Tabular`](crate::Tabular) and
/// [`Record`](crate::Record) impls.
///
/// Each field may carry `#[tsv = "column"]` to bind it to a header column.
/// Field types must implement [`FieldValue`](crate::FieldValue).
///
/// Field attributes are limited to doc comments followed by an optional
/// `#[tsv]`; derives and other attributes belong on the struct.
///
/// ```
/// use tsv_model::{Tabular, tsv_record};
///
/// tsv_record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         /// Display name.
///         #[tsv = "name"]
///         pub name: String,
///         #[tsv = "age"]
///         pub age: i64,
///     }
/// }
///
/// let layout = Person::layout();
/// assert_eq!(layout.position_of_tag("age"), Some(1));
/// ```
#[macro_export]
macro_rules! tsv_record {
    (@tag $tag:literal) => {
        ::std::option::Option::Some(::std::string::String::from($tag))
    };
    (@tag) => {
        ::std::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[tsv = $tag:literal])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Tabular for $name {
            fn layout() -> $crate::Layout {
                $crate::Layout::new(::std::vec![
                    $(
                        $crate::FieldSpec {
                            name: ::std::string::String::from(::std::stringify!($field)),
                            tag: $crate::tsv_record!(@tag $($tag)?),
                            kind: <$ty as $crate::FieldValue>::kind(),
                        },
                    )*
                ])
            }
        }

        impl $crate::Record for $name {
            fn assign(
                &mut self,
                index: usize,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::AssignError> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return <$ty as $crate::FieldValue>::store(&mut self.$field, value)
                            .map_err(|found| $crate::AssignError::TypeMismatch {
                                field: ::std::string::String::from(::std::stringify!($field)),
                                expected: <$ty as $crate::FieldValue>::kind(),
                                found: found.kind(),
                            });
                    }
                    position += 1;
                )*
                let _ = position;
                ::std::result::Result::Err($crate::AssignError::UnknownField { index })
            }
        }
    };
}
