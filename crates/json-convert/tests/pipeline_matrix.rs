use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use json_convert::{
    bindings, DefinedFields, IgnoreFieldsResolver, JsonCodec, Property, Record, RecordConverter,
    ShortDateConverter, TimeKindConverter, Trackable, TrackedConverter,
};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    secret: String,
    started_at: Option<DateTime<Utc>>,
    birthday: Option<NaiveDate>,
    #[serde(skip)]
    defined_fields: DefinedFields,
}

impl Record for Session {
    fn properties() -> Vec<Property<Self>> {
        bindings!(Session {
            user as "user": String,
            secret as "secret": String,
            started_at as "startedAt": Option<DateTime<Utc>>,
            birthday as "birthday": Option<NaiveDate>,
        })
    }
}

impl Trackable for Session {
    fn defined_fields(&self) -> &DefinedFields {
        &self.defined_fields
    }

    fn defined_fields_mut(&mut self) -> &mut DefinedFields {
        &mut self.defined_fields
    }
}

fn codec() -> JsonCodec {
    JsonCodec::new()
        .with_converter(TrackedConverter::new().with::<Session>())
        .with_converter(TimeKindConverter::new())
        .with_converter(ShortDateConverter::new())
        .with_converter(RecordConverter::new().with::<Session>())
        .with_resolver(IgnoreFieldsResolver::new(HashSet::from([
            "secret".to_string()
        ])))
}

#[test]
fn decode_tracks_presence_and_normalizes_dates() {
    let doc = json!({
        "user": "ada",
        "startedAt": "2024-01-15T12:00:00",
        "birthday": "1990-04-02T08:15:00",
    });
    let session: Session = codec().decode_as(&doc).unwrap();

    assert_eq!(session.user, "ada");
    // offset-less wire value, read through the reference zone
    assert_eq!(
        session.started_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap())
    );
    // time of day discarded
    assert_eq!(session.birthday, NaiveDate::from_ymd_opt(1990, 4, 2));
    assert_eq!(
        session.defined_fields,
        DefinedFields::from_iter(["user", "started_at", "birthday"])
    );
}

#[test]
fn suppressed_field_decodes_but_never_encodes() {
    let codec = codec();
    let doc = json!({"user": "ada", "secret": "hunter2"});
    let session: Session = codec.decode_as(&doc).unwrap();

    // decode is unaffected by suppression
    assert_eq!(session.secret, "hunter2");
    assert!(session.defined_fields.contains("secret"));

    let encoded = codec.encode_as(&session).unwrap();
    assert!(encoded.get("secret").is_none());
    assert_eq!(encoded.get("user"), Some(&json!("ada")));
}

#[test]
fn encode_then_decode_round_trips_instants_and_days() {
    let codec = codec();
    let session = Session {
        user: "ada".into(),
        secret: "hunter2".into(),
        started_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 17, 45, 0).unwrap()),
        birthday: NaiveDate::from_ymd_opt(1990, 4, 2),
        defined_fields: DefinedFields::new(),
    };

    let encoded = codec.encode_as(&session).unwrap();
    assert_eq!(
        encoded,
        json!({
            "user": "ada",
            "startedAt": "2024-03-15T17:45:00Z",
            "birthday": "1990-04-02",
        })
    );

    let decoded: Session = codec.decode_as(&encoded).unwrap();
    assert_eq!(decoded.started_at, session.started_at);
    assert_eq!(decoded.birthday, session.birthday);
    // the suppressed member was absent, so it is not defined and stays at
    // its default
    assert_eq!(decoded.secret, "");
    assert!(!decoded.defined_fields.contains("secret"));
}

#[test]
fn unregistered_types_are_untouched_by_the_extensions() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Plain {
        n: u32,
    }

    let codec = codec();
    let plain: Plain = codec.decode_as(&json!({"n": 7})).unwrap();
    assert_eq!(plain, Plain { n: 7 });
    assert_eq!(codec.encode_as(&plain).unwrap(), json!({"n": 7}));
}
