use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::json;

use json_convert::{
    bindings, DefinedFields, JsonCodec, Property, Record, Trackable, TrackedConverter,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Wide {
    a: i64,
    b: i64,
    c: i64,
    d: i64,
    e: i64,
    f: i64,
    g: i64,
    h: i64,
    #[serde(skip)]
    defined_fields: DefinedFields,
}

impl Record for Wide {
    fn properties() -> Vec<Property<Self>> {
        bindings!(Wide {
            a as "A": i64,
            b as "B": i64,
            c as "C": i64,
            d as "D": i64,
            e as "E": i64,
            f as "F": i64,
            g as "G": i64,
            h as "H": i64,
        })
    }
}

impl Trackable for Wide {
    fn defined_fields(&self) -> &DefinedFields {
        &self.defined_fields
    }

    fn defined_fields_mut(&mut self) -> &mut DefinedFields {
        &mut self.defined_fields
    }
}

#[test]
fn concurrent_first_use_always_sees_a_complete_mapping() {
    let codec = Arc::new(JsonCodec::new().with_converter(TrackedConverter::new().with::<Wide>()));
    let doc = Arc::new(json!({
        "A": 1, "B": 2, "C": 3, "D": 4, "E": 5, "F": 6, "G": 7, "H": 8,
    }));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let codec = Arc::clone(&codec);
            let doc = Arc::clone(&doc);
            thread::spawn(move || {
                // racing first use: every thread must observe the full,
                // validated mapping, never a partial one
                let wide: Wide = codec.decode_as(&doc).unwrap();
                assert_eq!(wide.defined_fields.len(), 8);
                assert_eq!((wide.a, wide.h), (1, 8));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
