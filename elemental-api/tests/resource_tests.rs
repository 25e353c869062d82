//! Integration tests for the generic collection handles
//!
//! Each test runs a mockito server standing in for the appliance and
//! checks the verb, path and body produced by the CRUD calls.

use elemental_api::{
    Collection, CollectionResource, ElementalClient, ResourceOperation, ResponseBody,
};
use mockito::{Matcher, Server};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

#[rstest]
#[case(Collection::Presets)]
#[case(Collection::Schedules)]
#[case(Collection::LiveEventProfiles)]
#[case(Collection::PresetCategories)]
#[case(Collection::LiveEvents)]
#[case(Collection::Devices)]
#[tokio::test]
async fn test_crud_verbs_and_paths(#[case] collection: Collection) {
    let mut server = Server::new_async().await;
    let base = format!("/api/{}", collection.name());
    let member = format!("{}/17", base);

    let list = server.mock("GET", base.as_str()).with_status(200).create_async().await;
    let retrieve = server.mock("GET", member.as_str()).with_status(200).create_async().await;
    let create = server
        .mock("POST", base.as_str())
        .match_header("content-type", "application/xml")
        .match_body(Matcher::Exact(format!("{}<name>new</name>", XML_DECL)))
        .with_status(201)
        .create_async()
        .await;
    let update = server
        .mock("PUT", member.as_str())
        .match_body(Matcher::Exact(format!("{}<name>renamed</name>", XML_DECL)))
        .with_status(200)
        .create_async()
        .await;
    let delete = server.mock("DELETE", member.as_str()).with_status(200).create_async().await;

    let client = ElementalClient::new(server.url()).unwrap();
    let handle = client.resource(collection);

    handle.list().await.unwrap();
    handle.retrieve("17").await.unwrap();
    handle.create(json!({"name": "new"})).await.unwrap();
    handle.update("17", json!({"name": "renamed"})).await.unwrap();
    handle.delete("17").await.unwrap();

    list.assert_async().await;
    retrieve.assert_async().await;
    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_list_with_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/live_events")
        .match_query(Matcher::UrlEncoded("filter".into(), "running".into()))
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(
            r#"<live_event_list>
                 <live_event href="/live_events/1"><name>A</name></live_event>
                 <live_event href="/live_events/2"><name>B</name></live_event>
               </live_event_list>"#,
        )
        .create_async()
        .await;

    let client = ElementalClient::new(server.url()).unwrap();
    let body = client
        .live_events()
        .list_with_query(vec![("filter".to_string(), "running".to_string())])
        .await
        .unwrap();

    mock.assert_async().await;

    let value = body.as_value().expect("XML body should be decoded");
    let events = value["live_event_list"]["live_event"].as_array().unwrap();
    let ids: Vec<_> = events
        .iter()
        .map(ElementalClient::extract_id_from_href)
        .collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn test_single_member_list_is_not_an_array() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/presets")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(r#"<preset_list><preset href="/presets/3"><name>HD</name></preset></preset_list>"#)
        .create_async()
        .await;

    let body = ElementalClient::new(server.url()).unwrap().presets().list().await.unwrap();

    assert_eq!(
        body,
        ResponseBody::Xml(json!({"preset_list": {"preset": {
            "$": {"href": "/presets/3"},
            "name": "HD"
        }}}))
    );
}

proptest! {
    #[test]
    fn prop_member_operations_address_the_id(id in "[0-9]{1,8}", index in 0usize..6) {
        let collection = Collection::ALL[index];
        for operation in ResourceOperation::ALL {
            let path = operation.path(collection, Some(id.as_str()));
            if operation.takes_id() {
                prop_assert_eq!(path, format!("/api/{}/{}", collection.name(), id));
            } else {
                prop_assert_eq!(path, format!("/api/{}", collection.name()));
            }
        }
    }
}
