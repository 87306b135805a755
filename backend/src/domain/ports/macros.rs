//! Helper macro generating port error enums.
//!
//! Each variant becomes a `thiserror` variant with its display message, and
//! gains a snake_case constructor whose `String` fields accept anything that
//! converts into the field type. The generated `kind` method names the
//! variant in snake_case for structured log fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
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

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake_case variant name, stable across message changes.
            pub const fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $( Self::$variant { .. } => stringify!([<$variant:snake>]), )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Missing { id: String } => "record {id} missing",
            Rejected { field: String, attempts: u32 } => "{field} rejected after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StorePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StorePortError::missing("42");
        assert_eq!(err, StorePortError::Missing { id: "42".to_owned() });
        assert_eq!(err.to_string(), "record 42 missing");
    }

    #[test]
    fn kinds_name_variants_in_snake_case() {
        let kinds = [
            StorePortError::unavailable().kind(),
            StorePortError::missing("42").kind(),
            StorePortError::rejected("email", 3_u32).kind(),
        ];
        assert_eq!(kinds, ["unavailable", "missing", "rejected"]);
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = StorePortError::rejected("email", 3_u32);
        assert_eq!(err.to_string(), "email rejected after 3 attempts");
    }
}
