//! Helper macro for generating domain port error enums.
//!
//! Each driven port carries a small `thiserror` enum; the macro also derives
//! snake_case constructor functions so adapters can write
//! `StoreError::unavailable("timed out")` instead of spelling out struct
//! variants.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        #[allow(missing_docs, reason = "constructors mirror the documented variants")]
        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error for exercising the macro shapes.
        pub enum ExamplePortError {
            /// Named-field variant.
            TimedOut { message: String } => "timed out: {message}",
            /// Unit variant.
            Gone => "record gone",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::timed_out("no route");
        assert_eq!(err.to_string(), "timed out: no route");
    }

    #[test]
    fn unit_variants_get_constructors_too() {
        assert_eq!(ExamplePortError::gone(), ExamplePortError::Gone);
    }
}
