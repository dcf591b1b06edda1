//! Helper macro for declaring port error enums.
//!
//! Repository and resolver failures in this service always carry a single
//! diagnostic (a message, a conflicting fact id or a rejected image key), so
//! each variant declares exactly one field. The macro derives the
//! `thiserror` enum and one snake-case constructor per variant taking
//! `impl Into<field type>`, which lets adapters write
//! `FactRepositoryError::query(err.to_string())` or
//! `FactRepositoryError::duplicate(fact.fact_id().as_str())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                        Self::$variant {
                            $field: $field.into(),
                        }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for port error enums.
    use rstest::rstest;

    define_port_error! {
        /// Errors raised by a test store.
        pub enum StoreError {
            /// Backend unreachable.
            Connection { message: String } => "store connection failed: {message}",
            /// Key already taken.
            Duplicate { fact_id: String } => "fact {fact_id} already exists",
        }
    }

    #[rstest]
    fn constructors_accept_borrowed_text() {
        let err = StoreError::connection("refused");
        assert_eq!(
            err,
            StoreError::Connection {
                message: "refused".to_owned()
            }
        );
        assert_eq!(err.to_string(), "store connection failed: refused");
    }

    #[rstest]
    fn multi_word_variants_get_snake_case_constructors() {
        let err = StoreError::duplicate(String::from("f-1"));
        assert_eq!(err.to_string(), "fact f-1 already exists");
    }
}
