use serde_json::Value;

use crate::codec::JsonCodec;
use crate::error::ConvertError;

/// One explicit wire binding: which document member maps onto which field,
/// and how to move a value across that seam in each direction.
///
/// `wire_name` is the member name as it appears in the document;
/// `field_name` is the in-memory field identifier. They frequently differ.
pub struct Property<T> {
    pub wire_name: &'static str,
    pub field_name: &'static str,
    pub assign: fn(&mut T, &Value, &JsonCodec) -> Result<(), ConvertError>,
    pub read: fn(&T, &JsonCodec) -> Result<Value, ConvertError>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

/// A record type with explicit wire bindings.
///
/// Bindings are declared alongside the type, typically with the
/// [`bindings!`](crate::bindings) macro, and validated once per process
/// when the type's mapping is first resolved.
pub trait Record: 'static {
    fn properties() -> Vec<Property<Self>>
    where
        Self: Sized;

    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Declares the wire bindings of a record type.
///
/// ```
/// use json_convert_core::{bindings, Property, Record};
///
/// #[derive(Default)]
/// struct User {
///     name: String,
///     age: Option<i64>,
/// }
///
/// impl Record for User {
///     fn properties() -> Vec<Property<Self>> {
///         bindings!(User {
///             name as "Name": String,
///             age as "Age": Option<i64>,
///         })
///     }
/// }
/// ```
#[macro_export]
macro_rules! bindings {
    ($ty:ty { $( $field:ident as $wire:literal : $fty:ty ),+ $(,)? }) => {
        vec![
            $(
                $crate::Property {
                    wire_name: $wire,
                    field_name: stringify!($field),
                    assign: {
                        fn assign(
                            target: &mut $ty,
                            node: &$crate::serde_json::Value,
                            codec: &$crate::JsonCodec,
                        ) -> ::core::result::Result<(), $crate::ConvertError> {
                            target.$field = codec.decode_as::<$fty>(node)?;
                            Ok(())
                        }
                        assign
                    },
                    read: {
                        fn read(
                            target: &$ty,
                            codec: &$crate::JsonCodec,
                        ) -> ::core::result::Result<$crate::serde_json::Value, $crate::ConvertError>
                        {
                            codec.encode_as::<$fty>(&target.$field)
                        }
                        read
                    },
                }
            ),+
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Record for Point {
        fn properties() -> Vec<Property<Self>> {
            bindings!(Point {
                x as "X": i64,
                y as "Y": i64,
            })
        }
    }

    #[test]
    fn generated_accessors_round_values_through_the_codec() {
        let codec = JsonCodec::new();
        let props = Point::properties();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].wire_name, "X");
        assert_eq!(props[0].field_name, "x");

        let mut point = Point::default();
        (props[1].assign)(&mut point, &json!(9), &codec).unwrap();
        assert_eq!(point.y, 9);
        assert_eq!((props[1].read)(&point, &codec).unwrap(), json!(9));
    }
}
