//! `define_port_error!` builds adapter error enums with snake_case
//! constructors, so adapters write `UserPersistenceError::query(msg)`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerPortError {
            Unreachable { message: String } => "ledger unreachable: {message}",
            Stale { version: u32 } => "ledger stale at version {version}",
            Rejected { message: String, version: u32 } => "ledger rejected {message} at {version}",
            Closed => "ledger closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerPortError::unreachable("socket closed");
        assert_eq!(err.to_string(), "ledger unreachable: socket closed");
    }

    #[test]
    fn typed_fields_keep_their_type() {
        assert_eq!(LedgerPortError::stale(7_u32).to_string(), "ledger stale at version 7");
    }

    #[test]
    fn mixed_fields_and_unit_variants_get_constructors() {
        let err = LedgerPortError::rejected("write", 3_u32);
        assert_eq!(err.to_string(), "ledger rejected write at 3");
        assert_eq!(LedgerPortError::closed(), LedgerPortError::Closed);
    }
}
