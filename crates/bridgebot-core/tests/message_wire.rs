// Verify the message wire format stays stable for adaptor authors.

use bridgebot_content::Content;
use bridgebot_core::{
    LocationPayload, MediaItem, MediaKind, MediaPayload, Message, MessagePayload, MessageSource,
    Sender, SenderRole, SourceScope, SystemEvent, TextPayload, User,
};
use chrono::{TimeZone, Utc};

fn base_message(payload: MessagePayload) -> Message {
    Message::new(
        "m-1",
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        Sender::User(User::new("u-1").with_name("Ada")),
        MessageSource::group("g-1"),
        payload,
    )
}

#[test]
fn text_message_round_trip() {
    let msg = base_message(MessagePayload::Text(TextPayload::new(Content::markdown(
        "**hi**",
    ))));

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains(r#""type":"text""#));
    assert!(json.contains(r#""format":"markdown""#));

    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn sender_roles_serialize_as_literals() {
    let mut msg = base_message(MessagePayload::Text(TextPayload::new(Content::markdown(
        "x",
    ))));
    msg.sender = Sender::bot();

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains(r#""sender":"bot""#));

    let back: Message = serde_json::from_str(&json).unwrap();
    assert!(matches!(back.sender, Sender::Role(SenderRole::Bot)));
}

#[test]
fn media_message_round_trip() {
    let msg = base_message(MessagePayload::Media(MediaPayload {
        items: vec![
            MediaItem {
                kind: MediaKind::Image,
                url: "https://cdn.example.com/a.png".into(),
            },
            MediaItem {
                kind: MediaKind::File,
                url: "https://cdn.example.com/b.pdf".into(),
            },
        ],
        size: Some(2048),
        caption: Some(Content::markdown("two files")),
        mentions: vec![],
    }));

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains(r#""type":"media""#));
    assert!(json.contains(r#""kind":"image""#));

    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn location_message_round_trip() {
    let msg = base_message(MessagePayload::Location(LocationPayload {
        latitude: 48.858,
        longitude: 2.294,
        address: Some("Champ de Mars".into()),
        accuracy: None,
    }));

    let back: Message = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn system_message_round_trip() {
    let msg = base_message(MessagePayload::System(SystemEvent::UserBanned {
        user: User::new("u-9"),
        reason: Some("spam".into()),
    }));

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains(r#""type":"system""#));
    assert!(json.contains(r#""system_type":"user_banned""#));
    assert!(json.contains(r#""payload""#));

    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn source_scope_tags() {
    for (source, tag) in [
        (MessageSource::private(), r#""type":"private""#),
        (MessageSource::group("g"), r#""type":"group""#),
        (MessageSource::channel("c"), r#""type":"channel""#),
        (MessageSource::forum("f"), r#""type":"forum""#),
    ] {
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains(tag), "missing {tag} in {json}");
    }
}

#[test]
fn source_extra_fields_survive() {
    let json = r#"{"type":"forum","forum_id":"f-1","thread_id":"t-9","workspace":"acme"}"#;
    let source: MessageSource = serde_json::from_str(json).unwrap();

    assert!(matches!(source.scope, SourceScope::Forum { .. }));
    assert_eq!(source.extra["workspace"], "acme");

    let out = serde_json::to_string(&source).unwrap();
    assert!(out.contains(r#""workspace":"acme""#));
}

#[test]
fn alt_fallback_preserves_identity_fields() {
    let msg = base_message(MessagePayload::Media(MediaPayload {
        items: vec![MediaItem {
            kind: MediaKind::Sticker,
            url: "sticker://42".into(),
        }],
        size: None,
        caption: None,
        mentions: vec![],
    }))
    .with_alt(Content::markdown("a sticker"));

    let synth = msg.alt_fallback().unwrap();
    assert_eq!(synth.id, msg.id);
    assert_eq!(synth.timestamp, msg.timestamp);
    assert_eq!(synth.sender, msg.sender);
    assert_eq!(synth.source, msg.source);
    assert!(synth.alt.is_none());
    match synth.payload {
        MessagePayload::Text(ref text) => {
            assert_eq!(text.content.raw(), "a sticker");
        }
        ref other => panic!("expected text payload, got {other:?}"),
    }
}

#[test]
fn messages_without_alt_have_no_fallback() {
    let msg = base_message(MessagePayload::Location(LocationPayload {
        latitude: 0.0,
        longitude: 0.0,
        address: None,
        accuracy: None,
    }));
    assert!(msg.alt_fallback().is_none());
}
